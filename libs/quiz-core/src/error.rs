//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using BankError.
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors that can occur while parsing a question bank file.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("invalid question bank JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },

    #[error("question {id} needs at least two options, found {found}")]
    TooFewOptions { id: String, found: usize },

    #[error("question {id}: correct answer {answer:?} is not one of its options")]
    UnknownCorrectAnswer { id: String, answer: String },

    #[error("duplicate question ID {id} at index {index}")]
    DuplicateId { id: String, index: usize },
}

/// Errors reported by a persistence adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors for operations that do not fit the current practice session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no question is being shown")]
    NoCurrentQuestion,

    #[error("question was already answered")]
    AlreadyAnswered,

    #[error("option {choice} is out of range (question has {available} options)")]
    OptionOutOfRange { choice: usize, available: usize },

    #[error("only a correctly answered question can be marked very easy")]
    NotAnsweredCorrectly,
}

/// Errors for the standard exam sheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExamError {
    #[error("question {0} is not part of this test")]
    UnknownQuestion(String),

    #[error("option {choice:?} is not offered by question {id}")]
    UnknownOption { id: String, choice: String },

    #[error("test was already submitted")]
    AlreadySubmitted,
}
