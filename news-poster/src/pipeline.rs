use crate::composer::compose_post;
use crate::config::AppConfig;
use crate::relevance::KeywordFilter;
use crate::selector::FeedSelector;
use crate::state::StateStore;
use crate::traits::{FeedFetcher, Publisher};
use crate::types::{Result, RunOutcome};
use tracing::info;

/// One selection-and-post pass: load history, pick, compose, publish, record
pub struct PostingPipeline<'a> {
    config: &'a AppConfig,
    fetcher: &'a dyn FeedFetcher,
    // None means dry run
    publisher: Option<&'a dyn Publisher>,
    filter: KeywordFilter,
}

impl<'a> PostingPipeline<'a> {
    pub fn new(
        config: &'a AppConfig,
        fetcher: &'a dyn FeedFetcher,
        publisher: Option<&'a dyn Publisher>,
    ) -> Self {
        Self {
            config,
            fetcher,
            publisher,
            filter: KeywordFilter::new(&config.keywords),
        }
    }

    pub async fn run(&self, store: &StateStore) -> Result<RunOutcome> {
        let mut history = store.load()?;
        let sources = self.config.feed_sources();

        let selector = FeedSelector::new(
            self.fetcher,
            &self.filter,
            self.config.similarity_threshold,
            self.config.max_entries_per_feed,
        );

        let candidate = match selector.select(&sources, &history).await {
            Some(candidate) => candidate,
            None => return Ok(RunOutcome::NoCandidate),
        };

        let post = compose_post(&candidate.title, &candidate.source.display_name);

        let publisher = match self.publisher {
            Some(publisher) => publisher,
            None => {
                info!("Dry run, not posting:\n{}", post.text);
                return Ok(RunOutcome::DryRun {
                    title: candidate.title,
                    text: post.text,
                });
            }
        };

        // A failed post leaves the history untouched so the item is retried next run
        let response = publisher.publish(&post.text).await?;
        info!("Posted '{}' from {}", candidate.title, candidate.source.display_name);

        history.push(candidate.title.clone());
        store.save(&history)?;

        Ok(RunOutcome::Posted {
            title: candidate.title,
            source: candidate.source.display_name,
            text: post.text,
            response,
        })
    }
}
