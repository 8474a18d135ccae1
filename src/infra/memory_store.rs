use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::services::KeyValueStore;

/// Session-only storage, used when nothing durable is available.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> AppResult<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Persistence("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
