use crate::dedup::{HISTORY_LIMIT, SIMILARITY_THRESHOLD};
use crate::selector::MAX_ENTRIES_PER_FEED;
use crate::types::{FeedSource, FetchConfig, PosterError, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;
use tracing::info;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.x.com/2/tweets";

/// Display label used for feeds on hosts we have no name for
pub const GENERIC_SOURCE_LABEL: &str = "Kaynak";

const DEFAULT_FEEDS: [&str; 4] = [
    "https://www.galatasaray.org/rss",
    "https://www.fotomac.com.tr/rss/Galatasaray.xml",
    "https://www.ntvspor.net/rss/kategori/futbol",
    "https://www.aspor.com.tr/rss/anasayfa.xml",
];

const DEFAULT_KEYWORDS: [&str; 7] = [
    "galatasaray",
    "g.saray",
    "g saray",
    "gs",
    "cimbom",
    "sarı-kırmızılı",
    "sari-kirmizili",
];

/// Host suffix to display name
const KNOWN_HOSTS: [(&str, &str); 4] = [
    ("galatasaray.org", "Galatasaray.org"),
    ("fotomac.com.tr", "Fotomaç"),
    ("ntvspor.net", "NTV Spor"),
    ("aspor.com.tr", "A Spor"),
];

/// Feed entry as written in the config file; the name is optional
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub display_name: Option<String>,
}

/// Runtime settings, built once at startup and handed to each component
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feeds: Vec<FeedConfig>,
    pub keywords: Vec<String>,
    pub similarity_threshold: f64,
    pub max_entries_per_feed: usize,
    pub history_limit: usize,
    pub endpoint: String,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS
                .iter()
                .map(|url| FeedConfig {
                    url: url.to_string(),
                    display_name: None,
                })
                .collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            similarity_threshold: SIMILARITY_THRESHOLD,
            max_entries_per_feed: MAX_ENTRIES_PER_FEED,
            history_limit: HISTORY_LIMIT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults, overridden by whatever the TOML file at `path` sets
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                let raw = std::fs::read_to_string(path)?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| PosterError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.feeds.is_empty() {
            return Err(PosterError::Config("no feeds configured".to_string()));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PosterError::Config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.history_limit == 0 {
            return Err(PosterError::Config("history_limit must be positive".to_string()));
        }
        Url::parse(&self.endpoint)?;
        Ok(())
    }

    /// Feeds in priority order with display names resolved
    pub fn feed_sources(&self) -> Vec<FeedSource> {
        self.feeds
            .iter()
            .map(|feed| {
                let name = feed
                    .display_name
                    .clone()
                    .unwrap_or_else(|| display_name_for(&feed.url));
                FeedSource::new(feed.url.clone(), name)
            })
            .collect()
    }
}

/// Display name for a feed URL, from its host
pub fn display_name_for(feed_url: &str) -> String {
    let host = Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();

    KNOWN_HOSTS
        .iter()
        .find(|(suffix, _)| host == *suffix || host.ends_with(&format!(".{}", suffix)))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| GENERIC_SOURCE_LABEL.to_string())
}

pub const ENV_API_KEY: &str = "X_API_KEY";
pub const ENV_API_SECRET: &str = "X_API_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "X_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "X_ACCESS_TOKEN_SECRET";

/// OAuth 1.0a user-context credentials for the posting API
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve all four secrets through `lookup`, reporting every missing one at once
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut get = |name: &'static str| match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            api_key: get(ENV_API_KEY),
            api_secret: get(ENV_API_SECRET),
            access_token: get(ENV_ACCESS_TOKEN),
            access_token_secret: get(ENV_ACCESS_TOKEN_SECRET),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(PosterError::MissingCredentials(missing))
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("access_token", &"***")
            .field("access_token_secret", &"***")
            .finish()
    }
}
