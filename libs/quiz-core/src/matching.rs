//! Deciding whether a chosen option is the correct one.

use serde::{Deserialize, Serialize};

/// How a chosen option is compared with the correct option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// Whole option text, whitespace-normalized.
    #[default]
    Exact,
    /// Only the leading option letter, case-insensitive ("a) ..." == "A) ...").
    OptionLetter,
}

/// Compare a chosen option to the correct one.
pub fn answers_match(chosen: &str, correct: &str, mode: MatchingMode) -> bool {
    match mode {
        MatchingMode::Exact => normalize_whitespace(chosen) == normalize_whitespace(correct),
        MatchingMode::OptionLetter => match (option_letter(chosen), option_letter(correct)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// First non-blank character of an option, lowercased.
pub fn option_letter(option: &str) -> Option<char> {
    option
        .trim_start()
        .chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
