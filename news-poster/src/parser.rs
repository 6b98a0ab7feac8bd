use crate::types::{ParsedEntry, ParsedFeed, PosterError, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

pub struct FeedParser;

impl FeedParser {
    /// Parse RSS, Atom or JSON Feed content, keeping entries in document order
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse a raw document; the XML declaration decides the character encoding
    pub fn parse_bytes(content: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| PosterError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<ParsedEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> ParsedEntry {
        // Untitled entries are kept so the per-feed entry window stays accurate
        let title = entry.title.map(|t| t.content);
        let url = entry.links.first().map(|l| l.href.clone());
        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc));

        ParsedEntry {
            title,
            url,
            published_at,
        }
    }
}
