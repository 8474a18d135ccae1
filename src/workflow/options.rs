use tracing::{info, warn};

use crate::domain::view::ViewOptions;
use crate::error::{AppError, AppResult};
use crate::view_state::ViewOptionsStore;

/// Applies raw command-line keys on top of `base`; fields left `None` keep
/// their current value.
pub fn apply_overrides(
    base: ViewOptions,
    grouping: Option<&str>,
    sorting: Option<&str>,
) -> AppResult<ViewOptions> {
    ViewOptions::parse(
        grouping.unwrap_or(base.grouping.as_str()),
        sorting.unwrap_or(base.sorting.as_str()),
    )
}

/// Saves `options`, downgrading an unavailable store to a warning so the
/// session carries on with the in-memory values. Returns whether the write
/// reached storage.
pub fn persist_or_warn(store: &ViewOptionsStore, options: &ViewOptions) -> AppResult<bool> {
    match store.save(options) {
        Ok(()) => {
            info!(grouping = %options.grouping, sorting = %options.sorting, "saved view options");
            Ok(true)
        }
        Err(AppError::Persistence(reason)) => {
            warn!(%reason, "view options not saved; using them for this session only");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
