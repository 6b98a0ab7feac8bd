use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured news feed, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub display_name: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
        }
    }
}

/// A feed entry that passed relevance and dedup checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: FeedSource,
}

/// Text ready to be submitted to the posting API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedPost {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "News-Poster/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub title: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ParsedEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: None,
            published_at: None,
        }
    }
}

/// Result of a single pass
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Posted {
        title: String,
        source: String,
        text: String,
        response: serde_json::Value,
    },
    DryRun {
        title: String,
        text: String,
    },
    NoCandidate,
}

#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Posting API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Missing environment variable(s): {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed body of {bytes} bytes exceeds the {limit_mb}MB limit")]
    FeedTooLarge { bytes: usize, limit_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PosterError>;
