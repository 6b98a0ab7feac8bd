/// Quote-like characters dropped before titles are compared
const QUOTE_CHARS: [char; 7] = ['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Canonicalize a title for comparison: lowercase, strip quotes, collapse whitespace
pub fn normalize_title(title: &str) -> String {
    // Quotes go first so that removing one never leaves a double space behind
    title
        .to_lowercase()
        .chars()
        .filter(|c| !QUOTE_CHARS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
