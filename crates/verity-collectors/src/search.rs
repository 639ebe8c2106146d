//! Web search — Brave Search API integration for the researcher node.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use verity_settings::SearchSettings;

use crate::errors::{CollectorError, Result};

/// Brave caps query length; longer claims are truncated, not rejected —
/// a partial query still gathers usable evidence.
const MAX_QUERY_LENGTH: usize = 400;

/// One web search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Short description.
    pub snippet: String,
}

/// Trait for claim-driven web search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web for evidence about a query.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Render search results into the evidence block fed to the synthesizer.
#[must_use]
pub fn render_evidence(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results found.".into();
    }
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({})\n   {}", i + 1, r.title, r.url, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Web search client for the Brave Search API.
pub struct BraveSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: usize,
}

impl BraveSearchClient {
    /// Create a client from search settings plus the key read from the
    /// environment.
    pub fn from_settings(settings: &SearchSettings, api_key: String) -> Result<Self> {
        Self::new(
            &settings.base_url,
            api_key,
            settings.max_results,
            Duration::from_millis(settings.timeout_ms),
        )
    }

    /// Create a client with explicit parameters.
    pub fn new(
        base_url: &str,
        api_key: String,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_results,
        })
    }
}

fn truncate_query(query: &str) -> &str {
    if query.len() <= MAX_QUERY_LENGTH {
        return query;
    }
    let mut end = MAX_QUERY_LENGTH;
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    &query[..end]
}

#[async_trait]
impl SearchProvider for BraveSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/res/v1/web/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[
                ("q", truncate_query(query).to_string()),
                ("count", self.max_results.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: Value = response.json().await?;
        let results = body
            .get("web")
            .and_then(|w| w.get("results"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .take(self.max_results)
                    .map(|r| SearchResult {
                        title: r.get("title").and_then(Value::as_str).unwrap_or("").into(),
                        url: r.get("url").and_then(Value::as_str).unwrap_or("").into(),
                        snippet: r
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or("")
                            .into(),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        debug!(count = results.len(), "web search complete");
        Ok(results)
    }
}
