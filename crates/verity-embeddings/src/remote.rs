//! HTTP client for an OpenAI-compatible embeddings backend.
//!
//! POSTs `{"model": ..., "input": [...]}` to `{base_url}/v1/embeddings` and
//! reads the vectors back from `data[].embedding`. Inputs longer than the
//! backend model's token limit are the backend's concern; its error response
//! surfaces here as [`EmbeddingError::Inference`] rather than being truncated
//! silently.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use verity_settings::EmbeddingSettings;

use crate::errors::{EmbeddingError, Result};
use crate::service::Embedder;

/// Client for a remote embeddings endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dims: usize,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    /// Create a client from embedding settings.
    pub fn from_settings(settings: &EmbeddingSettings) -> Result<Self> {
        Self::new(
            &settings.base_url,
            &settings.model,
            settings.dimensions,
            Duration::from_millis(settings.timeout_ms),
        )
    }

    /// Create a client with explicit parameters.
    pub fn new(base_url: &str, model: &str, dims: usize, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dims,
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}/v1/embeddings", self.base_url);
        let body = json!({
            "model": self.model,
            "input": texts,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Inference(format!(
                "backend returned HTTP {status}: {detail}"
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Inference(format!("malformed response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::Inference(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        let vectors: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();
        for v in &vectors {
            if v.len() != self.dims {
                return Err(EmbeddingError::Inference(format!(
                    "dimension mismatch: expected {}, got {}",
                    self.dims,
                    v.len()
                )));
            }
        }

        debug!(count = vectors.len(), dims = self.dims, "embedded batch");
        Ok(vectors)
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}
