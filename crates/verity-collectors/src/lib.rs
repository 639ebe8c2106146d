//! # verity-collectors
//!
//! Evidence gathering for the fact-check pipeline.
//!
//! Two consumption patterns:
//!
//! - the researcher node searches the web for a specific claim
//!   ([`search::SearchProvider`], backed by Brave Search)
//! - the trending feed pulls headline candidates from news and video APIs
//!   ([`feed::TrendingFeed`]) for auto-verification
//!
//! Collector failures degrade to empty result sets with a logged warning;
//! evidence gathering is best-effort by design.

#![deny(unsafe_code)]

pub mod errors;
pub mod feed;
pub mod news;
pub mod search;
pub mod youtube;

pub use errors::{CollectorError, Result};
pub use feed::{FeedSource, TrendingFeed};
pub use news::NewsClient;
pub use search::{render_evidence, BraveSearchClient, SearchProvider, SearchResult};
pub use youtube::YouTubeClient;
