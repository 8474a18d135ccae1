use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("failed to fetch tickets: {0}")]
    Fetch(String),
    #[error("invalid view option: {0}")]
    InvalidOption(String),
    #[error("view state persistence error: {0}")]
    Persistence(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
