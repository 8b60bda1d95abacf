//! Weighted question scheduler.
//!
//! Owns the weight map and the no-repeat bookkeeping for one practice
//! session. Weights are written through to the persistence adapter on every
//! change, so the adapter always holds the latest state.

use crate::sampling::{uniform_choice, weighted_choice};
use crate::store::{KeyValueStore, AVOID_REPEATS_KEY, WEIGHTS_KEY};
use crate::types::{Outcome, Question, QuestionId, SelectionPolicy};
use crate::weights::{WeightMap, WeightRule};
use rand::Rng;
use std::collections::HashSet;

pub struct Scheduler<S> {
    store: S,
    weights: WeightMap,
    rule: WeightRule,
    policy: SelectionPolicy,
    asked: HashSet<QuestionId>,
}

impl<S: KeyValueStore> Scheduler<S> {
    /// Build a scheduler, restoring weights and the repeat policy from `store`.
    pub fn new(store: S) -> Self {
        let weights = store
            .load(WEIGHTS_KEY)
            .map(|raw| WeightMap::from_json_lenient(&raw))
            .unwrap_or_default();
        let policy = load_policy(&store);

        tracing::debug!(
            stored_weights = weights.len(),
            policy = policy.as_str(),
            "scheduler restored"
        );

        Self {
            store,
            weights,
            rule: WeightRule::default(),
            policy,
            asked: HashSet::new(),
        }
    }

    pub fn with_rule(mut self, rule: WeightRule) -> Self {
        self.rule = rule;
        self
    }

    /// Pick the next question from `pool`, or `None` if the pool is empty.
    pub fn select_next<'a, R: Rng>(
        &mut self,
        pool: &'a [Question],
        rng: &mut R,
    ) -> Option<&'a Question> {
        let picked = match self.policy {
            SelectionPolicy::Weighted => weighted_choice(pool, &self.weights, rng),
            SelectionPolicy::NoRepeat => {
                let mut candidates: Vec<&Question> = pool
                    .iter()
                    .filter(|q| !self.asked.contains(&q.id))
                    .collect();
                if candidates.is_empty() && !pool.is_empty() {
                    tracing::debug!(pool = pool.len(), "pool exhausted, starting a new cycle");
                    self.asked.clear();
                    candidates = pool.iter().collect();
                }
                let picked = uniform_choice(&candidates, rng);
                if let Some(question) = picked {
                    self.asked.insert(question.id.clone());
                }
                picked
            }
        }?;

        tracing::debug!(
            question = %picked.id,
            weight = self.weights.get(&picked.id),
            policy = self.policy.as_str(),
            "selected question"
        );
        Some(picked)
    }

    /// Apply the weight rule for an answer and persist the result.
    ///
    /// Returns the question's new weight.
    pub fn record_answer(&mut self, id: &QuestionId, was_correct: bool, is_trivial: bool) -> f64 {
        let outcome = Outcome::from_answer(was_correct, is_trivial);
        let before = self.weights.get(id);
        let after = self.weights.apply(&self.rule, id, outcome);
        tracing::debug!(question = %id, ?outcome, before, after, "weight updated");
        self.persist_weights();
        after
    }

    /// Forget all weights and the asked set, and wipe persisted weights.
    pub fn reset(&mut self) {
        self.weights.clear();
        self.asked.clear();
        if let Err(err) = self.store.clear(WEIGHTS_KEY) {
            tracing::warn!(error = %err, "failed to clear stored weights");
        }
    }

    /// Forget which questions were already shown, e.g. after switching tests.
    pub fn reset_asked(&mut self) {
        self.asked.clear();
    }

    /// Switch selection policy and persist the choice.
    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        if policy != self.policy {
            self.asked.clear();
        }
        self.policy = policy;
        let flag = if policy.avoids_repeats() { "true" } else { "false" };
        if let Err(err) = self.store.save(AVOID_REPEATS_KEY, flag) {
            tracing::warn!(error = %err, "failed to save repeat preference");
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn weight(&self, id: &QuestionId) -> f64 {
        self.weights.get(id)
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn asked(&self) -> &HashSet<QuestionId> {
        &self.asked
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_weights(&mut self) {
        let encoded = match self.weights.to_json() {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode question weights");
                return;
            }
        };
        if let Err(err) = self.store.save(WEIGHTS_KEY, &encoded) {
            tracing::warn!(error = %err, "failed to save question weights");
        }
    }
}

fn load_policy<S: KeyValueStore>(store: &S) -> SelectionPolicy {
    match store.load(AVOID_REPEATS_KEY) {
        None => SelectionPolicy::default(),
        Some(raw) => match serde_json::from_str::<bool>(&raw) {
            Ok(avoid) => SelectionPolicy::from_avoid_repeats(avoid),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable repeat preference");
                SelectionPolicy::default()
            }
        },
    }
}
