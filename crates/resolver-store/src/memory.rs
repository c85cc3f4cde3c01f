//! In-memory slot store

use std::collections::HashMap;
use std::convert::Infallible;

use crate::KeyValueStore;

/// HashMap-backed slots
///
/// Stands in for real storage in tests, and backs sessions whose storage
/// medium is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    slots: HashMap<String, String>,
}

impl MemoryKvStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with preloaded slots
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: slots
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether a slot currently exists
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl KeyValueStore for MemoryKvStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.slots.remove(key);
        Ok(())
    }
}
