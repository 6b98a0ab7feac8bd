use crate::dedup::History;
use crate::relevance::KeywordFilter;
use crate::traits::FeedFetcher;
use crate::types::{Candidate, FeedSource, ParsedEntry};
use tracing::{debug, info, warn};

/// Default number of entries inspected per feed
pub const MAX_ENTRIES_PER_FEED: usize = 30;

/// Walks feeds in priority order and picks the first postable entry
pub struct FeedSelector<'a> {
    fetcher: &'a dyn FeedFetcher,
    filter: &'a KeywordFilter,
    similarity_threshold: f64,
    max_entries: usize,
}

impl<'a> FeedSelector<'a> {
    pub fn new(
        fetcher: &'a dyn FeedFetcher,
        filter: &'a KeywordFilter,
        similarity_threshold: f64,
        max_entries: usize,
    ) -> Self {
        Self {
            fetcher,
            filter,
            similarity_threshold,
            max_entries,
        }
    }

    /// First relevant, not-yet-posted entry across `sources`, or `None`.
    ///
    /// Earlier sources win over later ones; within a source the feed's own order wins.
    pub async fn select(&self, sources: &[FeedSource], history: &History) -> Option<Candidate> {
        for source in sources {
            let entries = self.fetch_isolated(source).await;

            if let Some((title, entry)) = self.first_qualifying(source, &entries, history) {
                info!(
                    "Selected '{}' from {} ({}, published {})",
                    title,
                    source.display_name,
                    entry.url.as_deref().unwrap_or("no link"),
                    entry
                        .published_at
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_else(|| "unknown".to_string())
                );
                return Some(Candidate {
                    title,
                    url: entry.url.clone(),
                    published_at: entry.published_at,
                    source: source.clone(),
                });
            }
        }

        info!("No new relevant items across {} feeds", sources.len());
        None
    }

    /// A failing feed yields no entries instead of aborting the scan
    async fn fetch_isolated(&self, source: &FeedSource) -> Vec<ParsedEntry> {
        match self.fetcher.fetch_entries(source).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping feed {} ({}): {}", source.display_name, source.url, e);
                Vec::new()
            }
        }
    }

    fn first_qualifying<'e>(
        &self,
        source: &FeedSource,
        entries: &'e [ParsedEntry],
        history: &History,
    ) -> Option<(String, &'e ParsedEntry)> {
        for entry in entries.iter().take(self.max_entries) {
            let title = entry.title.as_deref().unwrap_or("").trim();
            if title.is_empty() {
                continue;
            }
            if !self.filter.is_relevant(title) {
                debug!("Not relevant: {}", title);
                continue;
            }
            if history.already_shared(title, self.similarity_threshold) {
                debug!("Already shared: {}", title);
                continue;
            }
            return Some((title.to_string(), entry));
        }

        debug!("Nothing new in {}", source.display_name);
        None
    }
}
