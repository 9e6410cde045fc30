//! In-memory store for tests and embedding hosts.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use launchpad_core::Result;

use crate::port::KeyValueStore;

/// Process-local key-value map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one pre-existing value.
    pub fn with_value(key: &str, value: Value) -> Self {
        let store = Self::new();
        store.entries.write().insert(key.to_string(), value);
        store
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}
