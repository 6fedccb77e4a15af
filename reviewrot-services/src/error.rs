//! Error types for the platform clients

use thiserror::Error;

/// Result type for platform client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a review platform
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed or returned an error status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream payload could not be parsed as the expected format
    #[error("Invalid json content: {0}")]
    MalformedResponse(String),

    /// Core filtering/rendering error
    #[error(transparent)]
    Core(#[from] reviewrot_core::Error),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
