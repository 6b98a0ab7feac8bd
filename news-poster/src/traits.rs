use crate::types::{FeedSource, ParsedEntry, Result};
use async_trait::async_trait;

/// Transport for pulling entries out of a news feed
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse the feed, returning entries in the order the feed lists them
    async fn fetch_entries(&self, source: &FeedSource) -> Result<Vec<ParsedEntry>>;
}

/// Outbound sink for composed posts
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Submit the post text; any non-success response is an error
    async fn publish(&self, text: &str) -> Result<serde_json::Value>;
}
