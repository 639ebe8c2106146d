//! Embedding error types.
//!
//! Embedding failures are non-fatal to the primary request flow — the vault
//! degrades to "unavailable" and the pipeline recomputes.

use thiserror::Error;

/// Errors from embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Backend client could not be constructed or reached.
    #[error("embedding backend error: {0}")]
    Backend(String),

    /// HTTP transport failure (preserves source chain).
    #[error("embedding HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but the response was unusable.
    #[error("embedding inference failed: {0}")]
    Inference(String),

    /// Service not ready for inference.
    #[error("embedding service not ready")]
    NotReady,
}

/// Result alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;
