//! One upserter per entity kind.
//!
//! Each looks the record up by its natural key, updates the root row and
//! upserts the locale's translation when found, or creates both when not.
//! Errors propagate to the orchestrator, which isolates them per record.

mod blog_post;
mod category;
mod product;
mod static_page;

use chrono::{DateTime, Utc};

pub use blog_post::upsert_blog_post;
pub use category::upsert_category;
pub use product::upsert_product;
pub use static_page::upsert_static_page;

/// Whether a record produced a new root entity or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// The record's own locale wins over the run locale when it is non-empty.
fn effective_locale<'a>(record_locale: Option<&'a str>, run_locale: &'a str) -> &'a str {
    record_locale
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(run_locale)
}

/// Publish timestamp to write. `None` keeps whatever is stored.
///
/// An explicit timestamp always wins; otherwise a published entity that has
/// never been stamped is stamped now.
fn publish_timestamp(
    explicit: Option<DateTime<Utc>>,
    is_published: bool,
    stored: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    explicit.or_else(|| (is_published && stored.is_none()).then(Utc::now))
}

/// Zero-based array index as a stored `position`.
fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Treats blank optional strings from the scraper as absent.
fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_locale_overrides_run_locale() {
        assert_eq!(effective_locale(Some("de"), "en"), "de");
        assert_eq!(effective_locale(Some("  "), "en"), "en");
        assert_eq!(effective_locale(None, "en"), "en");
    }

    #[test]
    fn explicit_publish_timestamp_wins() {
        let explicit = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let stored = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            publish_timestamp(Some(explicit), false, Some(stored)),
            Some(explicit)
        );
    }

    #[test]
    fn first_publication_is_stamped_once() {
        let stored = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert!(publish_timestamp(None, true, None).is_some());
        assert!(publish_timestamp(None, true, Some(stored)).is_none());
        assert!(publish_timestamp(None, false, None).is_none());
    }

    #[test]
    fn position_saturates() {
        assert_eq!(position(3), 3);
        assert_eq!(position(usize::MAX), i32::MAX);
    }

    #[test]
    fn blank_optionals_are_absent() {
        assert_eq!(non_blank(Some(&"  ".to_string())), None);
        assert_eq!(non_blank(Some(&"x".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
