//! Per-question difficulty weights and the rule that adjusts them.
//!
//! A weight is proportional to how likely a question is to be drawn again.
//! Correct answers decay it geometrically, wrong answers grow it, and the
//! "very easy" signal retires a question almost completely. The bounds keep
//! the easiest-to-hardest selection ratio at 1000:1 so no question starves.

use crate::types::{Outcome, QuestionId};
use std::collections::BTreeMap;

/// Weight assumed for questions without an entry.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Lowest weight any entry may hold.
pub const MIN_WEIGHT: f64 = 0.01;
/// Highest weight any entry may hold.
pub const MAX_WEIGHT: f64 = 10.0;

/// Weight update rule with configurable parameters.
#[derive(Debug, Clone)]
pub struct WeightRule {
    pub correct_factor: f64,
    pub correct_floor: f64,
    pub very_easy_factor: f64,
    pub very_easy_floor: f64,
    pub incorrect_factor: f64,
    pub ceiling: f64,
}

impl Default for WeightRule {
    fn default() -> Self {
        Self {
            correct_factor: 0.7,
            correct_floor: 0.1,
            very_easy_factor: 0.1,
            very_easy_floor: MIN_WEIGHT,
            incorrect_factor: 1.5,
            ceiling: MAX_WEIGHT,
        }
    }
}

impl WeightRule {
    /// Compute the weight that follows `current` after an answer.
    pub fn next_weight(&self, current: f64, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::VeryEasy => (current * self.very_easy_factor).max(self.very_easy_floor),
            Outcome::Correct => (current * self.correct_factor).max(self.correct_floor),
            Outcome::Incorrect => (current * self.incorrect_factor).min(self.ceiling),
        }
    }
}

/// Mapping from question ID to weight. Missing entries weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMap(BTreeMap<QuestionId, f64>);

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `id`, falling back to the default.
    pub fn get(&self, id: &QuestionId) -> f64 {
        self.0.get(id).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Store a weight, clamped to the allowed range.
    pub fn set(&mut self, id: QuestionId, weight: f64) {
        self.0.insert(id, weight.clamp(MIN_WEIGHT, MAX_WEIGHT));
    }

    /// Apply `rule` to a single entry and return the new weight.
    pub fn apply(&mut self, rule: &WeightRule, id: &QuestionId, outcome: Outcome) -> f64 {
        let updated = rule.next_weight(self.get(id), outcome);
        self.set(id.clone(), updated);
        self.get(id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, f64)> {
        self.0.iter().map(|(id, w)| (id, *w))
    }

    /// Encode as the flat JSON object used for persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }

    /// Decode persisted weights.
    ///
    /// Never fails: unparseable input gives an empty map, non-numeric or
    /// non-positive entries are dropped, and out-of-range values are clamped.
    pub fn from_json_lenient(raw: &str) -> Self {
        let parsed: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable question weights");
                return Self::default();
            }
        };

        let mut weights = Self::default();
        for (key, value) in parsed {
            match value.as_f64() {
                Some(w) if w.is_finite() && w > 0.0 => weights.set(QuestionId::from(key), w),
                _ => tracing::warn!(question = %key, "dropping invalid stored weight"),
            }
        }
        weights
    }
}

impl FromIterator<(QuestionId, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, f64)>>(iter: I) -> Self {
        let mut weights = Self::default();
        for (id, w) in iter {
            weights.set(id, w);
        }
        weights
    }
}
