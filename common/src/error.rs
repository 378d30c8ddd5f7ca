//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Cannot {action} a job that is {status}")]
    InvalidTransition { action: String, status: String },

    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    #[error("Media not found: {0}")]
    MediaNotFound(u64),

    #[error("Media already attached: {0}")]
    DuplicateMedia(u64),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
