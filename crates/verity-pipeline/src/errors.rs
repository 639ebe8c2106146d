//! Pipeline error types.

use thiserror::Error;
use verity_llm::ProviderError;

/// Errors from running the fact-check pipeline.
///
/// Evidence-gathering failures are absorbed inside the pipeline (the
/// synthesizer is told the search failed); only the synthesis step itself
/// can fail the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The LLM call failed.
    #[error("synthesis failed: {0}")]
    Llm(#[from] ProviderError),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_provider_error() {
        let err: PipelineError = ProviderError::Other {
            message: "no capacity".into(),
        }
        .into();
        assert_eq!(err.to_string(), "synthesis failed: no capacity");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PipelineError>();
    }
}
