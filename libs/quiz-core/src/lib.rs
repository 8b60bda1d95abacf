//! Core quiz library for maritime exam practice.
//!
//! Provides:
//! - Question bank parsing and the in-memory question repository
//! - Adaptive question weighting and weighted sampling
//! - The practice scheduler with weighted and no-repeat policies
//! - Practice sessions with history navigation, and standard exam sheets
//! - The key-value persistence seam (with an in-memory store)

pub mod bank;
pub mod error;
pub mod exam;
pub mod history;
pub mod matching;
pub mod sampling;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;
pub mod weights;

pub use bank::{parse_test, QuestionBank, QuestionRepository};
pub use error::{BankError, ExamError, Result, SessionError, StoreError};
pub use exam::{ExamAnswer, ExamResult, ExamSheet};
pub use history::{HistoryEntry, SessionHistory, HISTORY_CAPACITY};
pub use matching::{answers_match, MatchingMode};
pub use scheduler::Scheduler;
pub use session::{AnswerFeedback, PracticeSession};
pub use store::{KeyValueStore, MemoryStore, AVOID_REPEATS_KEY, WEIGHTS_KEY};
pub use types::{Outcome, Question, QuestionId, QuizMode, Score, SelectionPolicy, ALL_QUESTIONS};
pub use weights::{WeightMap, WeightRule, MAX_WEIGHT, MIN_WEIGHT};
