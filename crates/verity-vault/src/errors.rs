//! Vault error types.

use thiserror::Error;
use verity_embeddings::EmbeddingError;

/// Errors from vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Embedding the claim failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// `SQLite` error (preserves source chain).
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Index operation failed (non-SQLite).
    #[error("index error: {0}")]
    Index(String),

    /// Metadata did not fit the flat schema the index accepts.
    #[error("invalid metadata: {0}")]
    Metadata(String),
}

/// Result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
