//! `YouTube` Data API collector.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use verity_settings::FeedSettings;

use crate::errors::{CollectorError, Result};
use crate::feed::FeedSource;

/// Client for the `YouTube` Data API search endpoint.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    max_results: usize,
}

impl YouTubeClient {
    /// Create a client from feed settings plus the key read from the
    /// environment.
    pub fn from_settings(settings: &FeedSettings, api_key: String) -> Result<Self> {
        Self::new(
            &settings.youtube_base_url,
            api_key,
            settings.page_size,
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

    /// Fetch recent videos matching a query, formatted as
    /// `"title - https://youtube.com/watch?v={id}"`.
    pub async fn fetch_videos(&self, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/youtube/v3/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet".to_string()),
                ("q", query.to_string()),
                ("type", "video".to_string()),
                ("maxResults", self.max_results.to_string()),
                ("key", self.api_key.clone()),
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
        let videos = body
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| {
                        let title = v
                            .get("snippet")
                            .and_then(|s| s.get("title"))
                            .and_then(Value::as_str)?;
                        let id = v
                            .get("id")
                            .and_then(|i| i.get("videoId"))
                            .and_then(Value::as_str)?;
                        Some(format!("{title} - https://youtube.com/watch?v={id}"))
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        debug!(count = videos.len(), "fetched videos");
        Ok(videos)
    }
}

#[async_trait]
impl FeedSource for YouTubeClient {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn collect(&self, query: &str) -> Result<Vec<String>> {
        self.fetch_videos(query).await
    }
}
