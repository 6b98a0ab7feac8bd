use crate::similarity::similarity_ratio;
use tracing::debug;

/// Titles at or above this ratio count as the same story
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Default number of posted titles retained across runs
pub const HISTORY_LIMIT: usize = 250;

/// Previously posted titles, oldest first, capped at `limit` entries
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    titles: Vec<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            titles: Vec::new(),
            limit,
        }
    }

    pub fn from_titles(titles: Vec<String>, limit: usize) -> Self {
        let mut history = Self { titles, limit };
        history.truncate();
        history
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Record a posted title, evicting the oldest entries past the limit
    pub fn push(&mut self, title: impl Into<String>) {
        self.titles.push(title.into());
        self.truncate();
    }

    fn truncate(&mut self) {
        if self.titles.len() > self.limit {
            let excess = self.titles.len() - self.limit;
            self.titles.drain(..excess);
        }
    }

    /// Whether `title` is a near-duplicate of anything already posted.
    ///
    /// Linear scan; the history is small and bounded.
    pub fn already_shared(&self, title: &str, threshold: f64) -> bool {
        self.titles.iter().any(|old| {
            let ratio = similarity_ratio(title, old);
            if ratio >= threshold {
                debug!("'{}' matches posted title '{}' ({:.2})", title, old, ratio);
                true
            } else {
                false
            }
        })
    }
}
