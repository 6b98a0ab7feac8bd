use crate::types::ComposedPost;
use tracing::debug;

/// Hard character limit of the posting API
pub const MAX_POST_CHARS: usize = 280;

/// Titles longer than this are shortened before composing
pub const MAX_TITLE_CHARS: usize = 240;

/// Length a title is cut to when the last-resort truncation kicks in
const FALLBACK_TITLE_CHARS: usize = 200;

const ELLIPSIS: &str = "...";
const SOURCE_PREFIX: &str = "Kaynak: ";

/// Build the post text for a title and its source display name.
///
/// Lengths count characters, not bytes. At most one corrective pass is made after
/// the initial title cut, so an extremely long source name can still overflow.
pub fn compose_post(title: &str, source: &str) -> ComposedPost {
    let ellipsis_len = ELLIPSIS.chars().count();

    let mut title = title.trim().to_string();
    if char_len(&title) > MAX_TITLE_CHARS {
        title = format!("{}{}", take_chars(&title, MAX_TITLE_CHARS - ellipsis_len), ELLIPSIS);
    }

    let text = render(&title, source);
    let text_len = char_len(&text);
    if text_len <= MAX_POST_CHARS {
        return ComposedPost { text };
    }

    let overflow = text_len - MAX_POST_CHARS;
    let title_len = char_len(&title);
    debug!("Post is {} chars over the limit, shortening title", overflow);

    let shortened = if overflow + ellipsis_len < title_len {
        format!(
            "{}{}",
            take_chars(&title, title_len - overflow - ellipsis_len),
            ELLIPSIS
        )
    } else {
        take_chars(&title, FALLBACK_TITLE_CHARS).to_string()
    };

    ComposedPost {
        text: render(&shortened, source),
    }
}

fn render(title: &str, source: &str) -> String {
    format!("{}\n{}{}", title, SOURCE_PREFIX, source)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of `s` holding at most `n` characters
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
