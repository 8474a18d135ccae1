use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use crate::domain::view::{GroupingKey, SortingKey, ViewOptions};
use crate::error::{AppError, AppResult};
use crate::services::KeyValueStore;

pub const GROUPING_KEY: &str = "groupingOption";
pub const SORTING_KEY: &str = "sortingOption";

/// Remembers the board's grouping and sorting between runs.
#[derive(Clone)]
pub struct ViewOptionsStore {
    store: Arc<dyn KeyValueStore>,
}

impl ViewOptionsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, options: &ViewOptions) -> AppResult<()> {
        self.store.set(GROUPING_KEY, options.grouping.as_str())?;
        self.store.set(SORTING_KEY, options.sorting.as_str())?;
        Ok(())
    }

    /// Each field falls back to its default on its own when the stored value
    /// is absent, unreadable or unknown.
    pub fn load(&self) -> ViewOptions {
        let defaults = ViewOptions::default();
        ViewOptions::new(
            self.read::<GroupingKey>(GROUPING_KEY)
                .unwrap_or(defaults.grouping),
            self.read::<SortingKey>(SORTING_KEY)
                .unwrap_or(defaults.sorting),
        )
    }

    pub fn reset(&self) -> AppResult<()> {
        self.store.remove(GROUPING_KEY)?;
        self.store.remove(SORTING_KEY)?;
        Ok(())
    }

    fn read<T: FromStr<Err = AppError>>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(value) => value?,
            Err(err) => {
                warn!(key, error = %err, "could not read stored view option, using default");
                return None;
            }
        };
        match raw.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, value = %raw, error = %err, "ignoring stored view option");
                None
            }
        }
    }
}
