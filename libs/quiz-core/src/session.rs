//! Random practice session.
//!
//! Ties the scheduler to one active question pool, the back/forward history
//! and the running score. Every method corresponds to one user event.

use crate::error::SessionError;
use crate::history::{HistoryEntry, SessionHistory};
use crate::matching::{answers_match, MatchingMode};
use crate::scheduler::Scheduler;
use crate::store::KeyValueStore;
use crate::types::{Question, Score, SelectionPolicy};
use rand::rngs::ThreadRng;
use rand::Rng;

/// What the user learns after answering.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub was_correct: bool,
    pub correct_option: String,
    pub new_weight: f64,
}

pub struct PracticeSession<S, R = ThreadRng> {
    scheduler: Scheduler<S>,
    rng: R,
    pool: Vec<Question>,
    selection: Option<(String, String)>,
    history: SessionHistory,
    score: Score,
    matching: MatchingMode,
}

impl<S: KeyValueStore> PracticeSession<S, ThreadRng> {
    pub fn new(scheduler: Scheduler<S>) -> Self {
        Self::with_rng(scheduler, rand::thread_rng())
    }
}

impl<S: KeyValueStore, R: Rng> PracticeSession<S, R> {
    pub fn with_rng(scheduler: Scheduler<S>, rng: R) -> Self {
        Self {
            scheduler,
            rng,
            pool: Vec::new(),
            selection: None,
            history: SessionHistory::new(),
            score: Score::default(),
            matching: MatchingMode::OptionLetter,
        }
    }

    pub fn with_matching(mut self, matching: MatchingMode) -> Self {
        self.matching = matching;
        self
    }

    /// Switch to a new category/test and present its first question.
    ///
    /// Score, history and the asked set start over. Returns `None` when the
    /// pool has no questions.
    pub fn load_pool(
        &mut self,
        category: &str,
        test: &str,
        questions: Vec<Question>,
    ) -> Option<&HistoryEntry> {
        tracing::info!(category, test, questions = questions.len(), "practice pool loaded");
        self.pool = questions;
        self.selection = Some((category.to_string(), test.to_string()));
        self.score.reset();
        self.history.clear();
        self.scheduler.reset_asked();
        self.next_question()
    }

    /// Draw and present another question, or `None` if the pool is empty.
    pub fn next_question(&mut self) -> Option<&HistoryEntry> {
        let question = self
            .scheduler
            .select_next(&self.pool, &mut self.rng)?
            .clone();
        Some(self.history.push(question))
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.history.current()
    }

    /// Answer the current question with the option at `choice` (zero-based).
    pub fn answer(&mut self, choice: usize) -> Result<AnswerFeedback, SessionError> {
        let matching = self.matching;
        let entry = self
            .history
            .current_mut()
            .ok_or(SessionError::NoCurrentQuestion)?;
        if entry.is_answered() {
            return Err(SessionError::AlreadyAnswered);
        }
        let available = entry.question.options.len();
        let chosen = entry
            .question
            .options
            .get(choice)
            .cloned()
            .ok_or(SessionError::OptionOutOfRange { choice, available })?;

        let was_correct = answers_match(&chosen, &entry.question.correct_option, matching);
        entry.user_answer = Some(chosen);
        entry.was_correct = was_correct;
        let id = entry.question.id.clone();
        let correct_option = entry.question.correct_option.clone();

        self.score.record(was_correct);
        let new_weight = self.scheduler.record_answer(&id, was_correct, false);

        Ok(AnswerFeedback {
            was_correct,
            correct_option,
            new_weight,
        })
    }

    /// Retire the current, correctly answered question further.
    ///
    /// Marking the same question twice leaves its weight alone.
    pub fn mark_very_easy(&mut self) -> Result<f64, SessionError> {
        let entry = self
            .history
            .current_mut()
            .ok_or(SessionError::NoCurrentQuestion)?;
        if !(entry.is_answered() && entry.was_correct) {
            return Err(SessionError::NotAnsweredCorrectly);
        }
        let id = entry.question.id.clone();
        if entry.marked_very_easy {
            return Ok(self.scheduler.weight(&id));
        }
        entry.marked_very_easy = true;
        Ok(self.scheduler.record_answer(&id, true, true))
    }

    /// Show the previous question again. No-op at the oldest entry.
    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        self.history.go_back()
    }

    /// Return towards the newest question. No-op at the newest entry.
    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        self.history.go_forward()
    }

    /// Full reset: score, history and all weights, then a fresh question.
    pub fn reset_score(&mut self) -> Option<&HistoryEntry> {
        tracing::info!("practice score and weights reset");
        self.score.reset();
        self.history.clear();
        self.scheduler.reset();
        self.next_question()
    }

    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.scheduler.set_policy(policy);
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.scheduler.policy()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// The active (category, test) pair, if a pool was loaded.
    pub fn selection(&self) -> Option<(&str, &str)> {
        self.selection
            .as_ref()
            .map(|(category, test)| (category.as_str(), test.as_str()))
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }
}
