use crate::normalize::normalize_title;

/// Substring-based keyword matcher over normalized titles.
///
/// Matching ignores word boundaries, so "gs" also hits "gsm". Short keywords trade
/// precision for tolerance of concatenated or oddly punctuated headlines.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| normalize_title(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// True if any keyword occurs in the normalized title
    pub fn is_relevant(&self, title: &str) -> bool {
        let normalized = normalize_title(title);
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}
