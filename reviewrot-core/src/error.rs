//! Error types for reviewrot

use thiserror::Error;

/// Result type alias for reviewrot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reviewrot operations
#[derive(Error, Debug)]
pub enum Error {
    /// Age filter state is neither "older" nor "newer"
    #[error("Invalid state value: {0}")]
    InvalidState(String),

    /// Age filter unit is not one of y, m, d, h, min
    #[error("Invalid duration type: {0}")]
    InvalidDuration(String),

    /// Render style name is not recognized
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
