// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MindtickError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database Error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Config Error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0} file not found, run `mindtick new` to create one")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Unknown filter `{0}`, run `mindtick tags` or `mindtick ranges` for valid filters")]
    UnknownFilter(String),

    #[error("Filter `{0}` repeats a filter kind that was already given")]
    DuplicateFilter(String),
}

pub type Result<T> = std::result::Result<T, MindtickError>;
