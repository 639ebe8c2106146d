//! Provider trait and error taxonomy.
//!
//! Every LLM backend implements [`ChatProvider`] to expose a unified
//! single-shot completion interface. The synthesizer sends one prompt per
//! claim and expects one text completion back — no streaming, no tool use.

use async_trait::async_trait;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur during provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failed (missing or invalid key).
    #[error("auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested retry delay in milliseconds.
        retry_after_ms: u64,
        /// Error description.
        message: String,
    },

    /// Provider returned an API error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Whether this error can be retried.
        retryable: bool,
    },

    /// Provider-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

impl ProviderError {
    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| {
                        s == reqwest::StatusCode::TOO_MANY_REQUESTS || s.is_server_error()
                    })
            }
            Self::RateLimited { .. } => true,
            Self::Api { retryable, .. } => *retryable,
            Self::Auth { .. } | Self::Json(_) | Self::Other { .. } => false,
        }
    }

    /// Error category string for log fields.
    pub fn category(&self) -> &str {
        match self {
            Self::Http(_) => "network",
            Self::Json(_) => "parse",
            Self::Auth { .. } => "auth",
            Self::RateLimited { .. } => "rate_limit",
            Self::Api { .. } => "api",
            Self::Other { .. } => "unknown",
        }
    }
}

/// Single-shot chat completion provider.
///
/// Implementors must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Current model ID (e.g. `"llama3-8b-8192"`).
    fn model(&self) -> &str;

    /// Run one prompt to completion and return the raw response text.
    async fn complete(&self, prompt: &str) -> ProviderResult<String>;
}
