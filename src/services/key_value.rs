use crate::error::AppResult;

/// Durable string storage for small user preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}
