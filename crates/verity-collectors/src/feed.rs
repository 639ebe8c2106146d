//! Combined trending feed across all active sources.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::Result;

/// Fallback item so the feed is never empty when every source fails.
const FALLBACK_ITEM: &str =
    "Breaking News: Local hackathon team invents AI that sees the future.";

/// One upstream source of trending claim candidates.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short source name for log fields.
    fn name(&self) -> &str;

    /// Collect candidate items for a query.
    async fn collect(&self, query: &str) -> Result<Vec<String>>;
}

/// Aggregates trending items from all configured sources.
///
/// Per-source failures degrade to an empty contribution with a logged
/// warning; the feed as a whole never fails.
pub struct TrendingFeed {
    sources: Vec<Box<dyn FeedSource>>,
    query: String,
}

impl TrendingFeed {
    /// Create a feed over the given sources.
    pub fn new(sources: Vec<Box<dyn FeedSource>>, query: String) -> Self {
        Self { sources, query }
    }

    /// Collect items from every source, deduplicated, in source order.
    pub async fn collect(&self) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();

        for source in &self.sources {
            match source.collect(&self.query).await {
                Ok(batch) => items.extend(batch),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "feed source failed, skipping");
                }
            }
        }

        // Dedupe while preserving order.
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert(item.clone()));

        if items.is_empty() {
            items.push(FALLBACK_ITEM.to_string());
        }
        items
    }
}
