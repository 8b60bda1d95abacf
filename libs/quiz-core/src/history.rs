//! Bounded buffer of recently presented questions.

use crate::types::Question;
use std::collections::VecDeque;

/// Number of questions kept for back/forward navigation.
pub const HISTORY_CAPACITY: usize = 5;

/// One presented question and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub question: Question,
    pub user_answer: Option<String>,
    pub was_correct: bool,
    pub marked_very_easy: bool,
}

impl HistoryEntry {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            user_answer: None,
            was_correct: false,
            marked_very_easy: false,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }
}

/// Ring of the last few questions with a cursor on the one being shown.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    capacity: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Append a freshly presented question and move the cursor onto it.
    pub fn push(&mut self, question: Question) -> &HistoryEntry {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry::new(question));
        self.cursor = self.entries.len() - 1;
        &self.entries[self.cursor]
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn current_mut(&mut self) -> Option<&mut HistoryEntry> {
        self.entries.get_mut(self.cursor)
    }

    /// Step to the previous entry. At the oldest entry nothing changes.
    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Step to the next entry. At the newest entry nothing changes.
    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn is_at_newest(&self) -> bool {
        self.entries.is_empty() || self.cursor + 1 == self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
