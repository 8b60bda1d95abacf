//! Core types for the quiz application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved test name meaning every test of a category.
pub const ALL_QUESTIONS: &str = "All Questions";

/// Question identifier.
///
/// Bank files use plain numbers for IDs, but persisted weights are keyed by
/// strings, so identifiers are always compared in their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct QuestionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for QuestionId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A multiple-choice question as stored in a bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_option: String,
}

/// Running tally for a practice session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

impl Score {
    pub fn record(&mut self, was_correct: bool) {
        if was_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Percentage of correct answers, 0.0 when nothing was answered.
    pub fn percent(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.correct) * 100.0 / f64::from(total),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// How the next practice question is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Sample proportionally to each question's weight.
    Weighted,
    /// Uniform draw, no repeats until the pool is exhausted.
    #[default]
    NoRepeat,
}

impl SelectionPolicy {
    /// Map the persisted "avoid repeat questions" flag to a policy.
    pub fn from_avoid_repeats(avoid: bool) -> Self {
        if avoid { Self::NoRepeat } else { Self::Weighted }
    }

    pub fn avoids_repeats(self) -> bool {
        matches!(self, Self::NoRepeat)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::NoRepeat => "no_repeat",
        }
    }
}

/// Quiz presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Sit a whole test and submit it for a result.
    #[default]
    Standard,
    /// Endless adaptive practice, one question at a time.
    Random,
}

impl QuizMode {
    /// The reserved "All Questions" test opens in random practice.
    pub fn for_test(test_name: &str) -> Self {
        if test_name == ALL_QUESTIONS {
            Self::Random
        } else {
            Self::Standard
        }
    }
}

/// Outcome of an answer event, as seen by the weight rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Incorrect,
    Correct,
    VeryEasy,
}

impl Outcome {
    /// The trivial flag only applies to correct answers.
    pub fn from_answer(was_correct: bool, is_trivial: bool) -> Self {
        match (was_correct, is_trivial) {
            (false, _) => Self::Incorrect,
            (true, false) => Self::Correct,
            (true, true) => Self::VeryEasy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn question_reads_bank_field_names() {
        let json = r#"{"id": 7, "question": "Port side light?", "options": ["A) Red", "B) Green"], "correctAnswer": "A) Red"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, QuestionId::from(7));
        assert_eq!(question.prompt, "Port side light?");
        assert_eq!(question.correct_option, "A) Red");
    }

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        let from_number: QuestionId = serde_json::from_str("12").unwrap();
        let from_text: QuestionId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"12\"");
    }

    #[test]
    fn score_percent_handles_empty_tally() {
        let mut score = Score::default();
        assert_eq!(score.percent(), 0.0);
        score.record(true);
        score.record(true);
        score.record(false);
        score.record(true);
        assert_eq!(score, Score { correct: 3, incorrect: 1 });
        assert_eq!(score.percent(), 75.0);
        score.reset();
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn trivial_flag_ignored_for_wrong_answers() {
        assert_eq!(Outcome::from_answer(false, true), Outcome::Incorrect);
        assert_eq!(Outcome::from_answer(true, true), Outcome::VeryEasy);
        assert_eq!(Outcome::from_answer(true, false), Outcome::Correct);
    }

    #[test]
    fn all_questions_opens_random_mode() {
        assert_eq!(QuizMode::for_test(ALL_QUESTIONS), QuizMode::Random);
        assert_eq!(QuizMode::for_test("Test 3"), QuizMode::Standard);
    }
}
