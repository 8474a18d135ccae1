use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "https://api.quicksell.co/v1/internal/frontend-assignment";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENDPOINT_VAR: &str = "KANBAN_ENDPOINT";
const TIMEOUT_VAR: &str = "KANBAN_TIMEOUT_SECS";
const STATE_DIR_VAR: &str = "KANBAN_STATE_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub state_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = value(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout_secs = match value(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Configuration(format!(
                        "{TIMEOUT_VAR} must be a positive number of seconds, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let state_dir = match value(STATE_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => config_directory()?,
        };

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            state_dir,
        })
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("kanban"))
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "could not determine a configuration directory; set {STATE_DIR_VAR}"
            ))
        })
}
