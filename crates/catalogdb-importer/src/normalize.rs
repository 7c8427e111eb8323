//! Pure text helpers shared by the upserters.
//!
//! These use manual character scanning rather than `regex`; every function
//! operates on `char`s so multi-byte input is never split mid code point.

use catalogdb_core::ScrapedSpecification;

/// Default excerpt length used when deriving summaries from body text.
pub const DEFAULT_TRUNCATE_LEN: usize = 160;

/// Longest tag (in characters) kept by [`extract_tags_from_text`].
pub const MAX_TAG_LEN: usize = 50;

/// Most tags kept by [`extract_tags_from_text`].
pub const MAX_TAGS: usize = 50;

const ELLIPSIS: &str = "...";

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Produces a URL-safe slug.
///
/// Lowercases, drops everything other than ASCII word characters,
/// whitespace and `-`, turns each run of whitespace/hyphens into a single
/// hyphen, and trims hyphens from both ends.
///
/// ```
/// use catalogdb_importer::normalize::generate_slug;
///
/// assert_eq!(generate_slug("Ceramic  Coating!!"), "ceramic-coating");
/// assert_eq!(generate_slug("--Already--Slugged--"), "already-slugged");
/// ```
#[must_use]
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Decodes the handful of HTML entities scrapers leave behind, collapses
/// whitespace runs to a single space, and trims.
///
/// Entities are decoded in one left-to-right pass, so `&amp;lt;` becomes
/// `&lt;` rather than `<`.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find('&') {
        decoded.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, replacement)) => {
                decoded.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }
    decoded.push_str(rest);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortens `text` to at most `max_len` characters, replacing the tail with
/// `"..."` when it had to cut.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Turns raw specification table rows into key/value/unit triples.
///
/// Rows with fewer than two cells, or whose cleaned key or value is empty,
/// are skipped. A non-empty third cell becomes the unit.
#[must_use]
pub fn parse_specifications(rows: &[Vec<String>]) -> Vec<ScrapedSpecification> {
    rows.iter()
        .filter_map(|row| {
            let [key, value, rest @ ..] = row.as_slice() else {
                return None;
            };
            let key = clean_text(key);
            let value = clean_text(value);
            if key.is_empty() || value.is_empty() {
                return None;
            }
            let unit = rest
                .first()
                .map(|cell| clean_text(cell))
                .filter(|u| !u.is_empty());
            Some(ScrapedSpecification { key, value, unit })
        })
        .collect()
}

/// Splits a delimited keyword string into normalized tag names.
///
/// Entries are trimmed and lowercased; empty ones and ones longer than
/// [`MAX_TAG_LEN`] characters are dropped, and at most [`MAX_TAGS`] are
/// returned.
#[must_use]
pub fn extract_tags_from_text(text: &str, delimiter: &str) -> Vec<String> {
    text.split(delimiter)
        .map(|part| part.trim().to_lowercase())
        .filter(|tag| !tag.is_empty() && tag.chars().count() <= MAX_TAG_LEN)
        .take(MAX_TAGS)
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
