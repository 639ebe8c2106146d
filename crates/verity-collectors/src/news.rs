//! `NewsAPI` headlines collector.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use verity_settings::FeedSettings;

use crate::errors::{CollectorError, Result};
use crate::feed::FeedSource;

/// Client for the `NewsAPI` `everything` endpoint.
pub struct NewsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    page_size: usize,
}

impl NewsClient {
    /// Create a client from feed settings plus the key read from the
    /// environment.
    pub fn from_settings(settings: &FeedSettings, api_key: String) -> Result<Self> {
        Self::new(
            &settings.news_base_url,
            api_key,
            settings.page_size,
            Duration::from_millis(settings.timeout_ms),
        )
    }

    /// Create a client with explicit parameters.
    pub fn new(
        base_url: &str,
        api_key: String,
        page_size: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size,
        })
    }

    /// Fetch headlines matching a query, formatted as `"title - url"`.
    pub async fn fetch_headlines(&self, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/v2/everything", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("pageSize", self.page_size.to_string()),
                ("apiKey", self.api_key.clone()),
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
        let headlines = body
            .get("articles")
            .and_then(Value::as_array)
            .map(|articles| {
                articles
                    .iter()
                    .filter_map(|a| {
                        let title = a.get("title").and_then(Value::as_str)?;
                        let url = a.get("url").and_then(Value::as_str)?;
                        Some(format!("{title} - {url}"))
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        debug!(count = headlines.len(), "fetched news headlines");
        Ok(headlines)
    }
}

#[async_trait]
impl FeedSource for NewsClient {
    fn name(&self) -> &str {
        "news"
    }

    async fn collect(&self, query: &str) -> Result<Vec<String>> {
        self.fetch_headlines(query).await
    }
}
