//! Groq provider — OpenAI-compatible chat completions.
//!
//! Sends one non-streaming request per completion. The low default
//! temperature keeps verdict synthesis close to the evidence rather than
//! creative.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use verity_settings::LlmSettings;

use crate::provider::{ChatProvider, ProviderError, ProviderResult};

/// Fallback retry delay when a 429 response carries no `Retry-After`.
const DEFAULT_RETRY_AFTER_MS: u64 = 10_000;

/// Configuration for a [`GroqProvider`].
#[derive(Clone, Debug)]
pub struct GroqConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GroqConfig {
    /// Build a config from settings plus the key read from the environment.
    #[must_use]
    pub fn from_settings(settings: &LlmSettings, api_key: String) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }
}

/// Chat completion provider backed by Groq.
pub struct GroqProvider {
    client: reqwest::Client,
    config: GroqConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl GroqProvider {
    /// Create a provider. Fails if no API key is configured.
    pub fn new(config: GroqConfig) -> ProviderResult<Self> {
        if config.api_key.is_empty() {
            return Err(ProviderError::Auth {
                message: "no API key configured".into(),
            });
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Http)?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

fn retry_after_ms(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs * 1000)
}

#[async_trait]
impl ChatProvider for GroqProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth {
                message: format!("provider rejected credentials (HTTP {status})"),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = retry_after_ms(&response);
            return Err(ProviderError::RateLimited {
                retry_after_ms,
                message: response.text().await.unwrap_or_default(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
                retryable: status.is_server_error(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Other {
                message: "response contained no choices".into(),
            })?;

        debug!(model = %self.config.model, chars = content.len(), "completion received");
        Ok(content)
    }
}
