use crate::parser::FeedParser;
use crate::traits::FeedFetcher;
use crate::types::{FeedSource, FetchConfig, ParsedEntry, PosterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// HTTP feed transport. One request per feed, no retries.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Download the raw feed document, refusing bodies over `max_feed_size_mb`
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        let url = Url::parse(url)?;

        debug!("Fetching feed: {}", url);

        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PosterError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let max_bytes = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > max_bytes {
                return Err(PosterError::FeedTooLarge {
                    bytes: content_length as usize,
                    limit_mb: self.config.max_feed_size_mb,
                });
            }
        }

        // Chunked responses carry no length, so the cap is also enforced while reading
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > max_bytes {
                return Err(PosterError::FeedTooLarge {
                    bytes: body.len() + chunk.len(),
                    limit_mb: self.config.max_feed_size_mb,
                });
            }
            body.extend_from_slice(&chunk);
        }

        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            body.len(),
            start_time.elapsed().as_millis()
        );
        Ok(body)
    }
}

#[async_trait]
impl FeedFetcher for Fetcher {
    async fn fetch_entries(&self, source: &FeedSource) -> Result<Vec<ParsedEntry>> {
        let content = self.fetch_feed(&source.url).await?;
        let parsed = FeedParser::parse_bytes(&content)?;
        debug!(
            "{} ({}) lists {} entries",
            source.display_name,
            parsed.title.as_deref().unwrap_or("untitled feed"),
            parsed.entries.len()
        );
        Ok(parsed.entries)
    }
}
