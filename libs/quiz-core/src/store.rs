//! Persistence adapter seam.
//!
//! The scheduler only needs a durable string key-value store, the same shape
//! as browser local storage. Values are JSON.

use crate::error::StoreError;
use std::collections::HashMap;

/// Key under which question weights are stored.
pub const WEIGHTS_KEY: &str = "questionWeights";
/// Key under which the no-repeat toggle is stored.
pub const AVOID_REPEATS_KEY: &str = "avoidRepeatQuestions";

/// Durable key-value storage.
pub trait KeyValueStore {
    /// Read a value. Backend failures are reported as absent values.
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with one value.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).clear(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert!(store.load(WEIGHTS_KEY).is_none());
        store.save(WEIGHTS_KEY, "{}").unwrap();
        assert_eq!(store.load(WEIGHTS_KEY).as_deref(), Some("{}"));
        store.clear(WEIGHTS_KEY).unwrap();
        assert!(!store.contains(WEIGHTS_KEY));
    }
}
