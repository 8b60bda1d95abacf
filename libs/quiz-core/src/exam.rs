//! Standard mode: answer a whole test, then submit it for a result.

use crate::error::ExamError;
use crate::matching::{answers_match, MatchingMode};
use crate::types::{Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The option picked for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAnswer {
    pub selected: String,
    pub is_correct: bool,
}

/// Outcome of a submitted test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

impl ExamResult {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

/// Answer sheet for one test.
#[derive(Debug, Clone)]
pub struct ExamSheet {
    questions: Vec<Question>,
    answers: HashMap<QuestionId, ExamAnswer>,
    submitted: bool,
}

impl ExamSheet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            submitted: false,
        }
    }

    /// Record (or change) the option chosen for a question.
    ///
    /// Returns whether the choice is correct.
    pub fn select(&mut self, id: &QuestionId, option: &str) -> Result<bool, ExamError> {
        if self.submitted {
            return Err(ExamError::AlreadySubmitted);
        }
        let question = self
            .questions
            .iter()
            .find(|q| &q.id == id)
            .ok_or_else(|| ExamError::UnknownQuestion(id.to_string()))?;
        if !question.options.iter().any(|o| o == option) {
            return Err(ExamError::UnknownOption {
                id: id.to_string(),
                choice: option.to_string(),
            });
        }

        let is_correct = answers_match(option, &question.correct_option, MatchingMode::Exact);
        self.answers.insert(
            id.clone(),
            ExamAnswer {
                selected: option.to_string(),
                is_correct,
            },
        );
        Ok(is_correct)
    }

    /// Freeze the sheet and score it. Submitting again returns the same result.
    pub fn submit(&mut self) -> ExamResult {
        if !self.submitted {
            tracing::debug!(
                answered = self.answers.len(),
                total = self.questions.len(),
                "test submitted"
            );
        }
        self.submitted = true;
        self.tally()
    }

    /// Result of a submitted sheet.
    pub fn result(&self) -> Option<ExamResult> {
        self.submitted.then(|| self.tally())
    }

    /// Clear all choices and reopen the sheet.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.submitted = false;
    }

    pub fn answer(&self, id: &QuestionId) -> Option<&ExamAnswer> {
        self.answers.get(id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn tally(&self) -> ExamResult {
        ExamResult {
            correct: self.answers.values().filter(|a| a.is_correct).count(),
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> ExamSheet {
        let questions = (1..=3)
            .map(|id| Question {
                id: QuestionId::from(id),
                prompt: format!("Question {}", id),
                options: vec!["A) Bow".into(), "B) Stern".into()],
                correct_option: "B) Stern".into(),
            })
            .collect();
        ExamSheet::new(questions)
    }

    #[test]
    fn scores_submitted_sheet() {
        let mut sheet = sheet();
        assert!(sheet.select(&QuestionId::from(1), "B) Stern").unwrap());
        assert!(!sheet.select(&QuestionId::from(2), "A) Bow").unwrap());
        assert!(sheet.result().is_none());

        let result = sheet.submit();
        assert_eq!(result, ExamResult { correct: 1, answered: 2, total: 3 });
        assert_eq!(sheet.result(), Some(result));
    }

    #[test]
    fn every_parsed_question_has_a_scoring_option() {
        let input = r#"[
            {"id": 1, "question": "Port light?", "options": ["A) Red", "B) Green"], "correctAnswer": "A) Red"},
            {"id": 2, "question": "Sound signal?", "options": ["A) One short", "B)  Two short "], "correctAnswer": "B) Two short"},
            {"id": "c3", "question": "Anchor ball?", "options": ["A) Day", "B) Night", "C) Never"], "correctAnswer": "A) Day"}
        ]"#;
        let questions = crate::bank::parse_test(input).unwrap();
        let mut sheet = ExamSheet::new(questions.clone());

        for question in &questions {
            let scoring: Vec<&String> = question
                .options
                .iter()
                .filter(|option| sheet.select(&question.id, option).unwrap())
                .collect();
            assert_eq!(scoring.len(), 1, "question {}", question.id);
        }
    }

    #[test]
    fn choices_can_change_before_submission() {
        let mut sheet = sheet();
        let id = QuestionId::from(1);
        sheet.select(&id, "A) Bow").unwrap();
        sheet.select(&id, "B) Stern").unwrap();
        assert_eq!(sheet.answer(&id).unwrap().selected, "B) Stern");
        assert_eq!(sheet.submit().correct, 1);
    }

    #[test]
    fn submitted_sheet_is_frozen_until_reset() {
        let mut sheet = sheet();
        sheet.submit();
        assert_eq!(
            sheet.select(&QuestionId::from(1), "B) Stern"),
            Err(ExamError::AlreadySubmitted)
        );
        sheet.reset();
        assert!(!sheet.is_submitted());
        assert!(sheet.select(&QuestionId::from(1), "B) Stern").is_ok());
    }

    #[test]
    fn rejects_unknown_questions_and_options() {
        let mut sheet = sheet();
        assert_eq!(
            sheet.select(&QuestionId::from(9), "A) Bow"),
            Err(ExamError::UnknownQuestion("9".into()))
        );
        assert!(matches!(
            sheet.select(&QuestionId::from(1), "C) Keel"),
            Err(ExamError::UnknownOption { .. })
        ));
    }

    #[test]
    fn empty_sheet_scores_zero_percent() {
        let mut sheet = ExamSheet::new(vec![]);
        assert_eq!(sheet.submit().percent(), 0.0);
    }
}
