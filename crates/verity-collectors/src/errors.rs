//! Collector error types.

use thiserror::Error;

/// Errors from evidence collection.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// Response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No API key available for this source.
    #[error("missing API key: {0}")]
    MissingKey(String),
}

/// Result alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;
