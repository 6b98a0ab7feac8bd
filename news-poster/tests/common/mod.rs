#![allow(dead_code)]

use async_trait::async_trait;
use news_poster::{FeedFetcher, FeedSource, ParsedEntry, PosterError, Publisher, Result};
use std::collections::HashMap;
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// In-memory feeds keyed by URL; a `None` feed fails to fetch
#[derive(Default)]
pub struct MockFetcher {
    feeds: HashMap<String, Option<Vec<ParsedEntry>>>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, titles: &[&str]) -> Self {
        let entries = titles.iter().map(|t| ParsedEntry::titled(*t)).collect();
        self.feeds.insert(url.to_string(), Some(entries));
        self
    }

    pub fn with_entries(mut self, url: &str, entries: Vec<ParsedEntry>) -> Self {
        self.feeds.insert(url.to_string(), Some(entries));
        self
    }

    pub fn with_failing_feed(mut self, url: &str) -> Self {
        self.feeds.insert(url.to_string(), None);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for MockFetcher {
    async fn fetch_entries(&self, source: &FeedSource) -> Result<Vec<ParsedEntry>> {
        self.requested.lock().unwrap().push(source.url.clone());
        match self.feeds.get(&source.url) {
            Some(Some(entries)) => Ok(entries.clone()),
            Some(None) => Err(PosterError::Parse(format!("unreachable feed {}", source.url))),
            None => Ok(Vec::new()),
        }
    }
}

/// Records submitted posts; optionally answers with an API error
pub struct MockPublisher {
    fail_with: Option<u16>,
    posted: Mutex<Vec<String>>,
}

impl MockPublisher {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, text: &str) -> Result<serde_json::Value> {
        self.posted.lock().unwrap().push(text.to_string());
        match self.fail_with {
            Some(status) => Err(PosterError::Api {
                status,
                body: "{\"title\":\"Forbidden\"}".to_string(),
            }),
            None => Ok(serde_json::json!({ "data": { "id": "1", "text": text } })),
        }
    }
}

pub fn source(url: &str, name: &str) -> FeedSource {
    FeedSource::new(url, name)
}
