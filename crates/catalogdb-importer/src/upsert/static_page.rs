use catalogdb_core::ScrapedStaticPage;
use catalogdb_db::{CatalogStore, StaticPageData, StaticPageTranslationData};

use super::{effective_locale, non_blank, publish_timestamp, UpsertOutcome};
use crate::error::ImportError;

/// Creates or updates a static page and its translation for the locale.
///
/// # Errors
///
/// Returns [`ImportError::MissingKey`] for an empty slug, or
/// [`ImportError::Db`] if any store call fails.
pub async fn upsert_static_page<S: CatalogStore + ?Sized>(
    store: &S,
    record: &ScrapedStaticPage,
    locale: &str,
) -> Result<UpsertOutcome, ImportError> {
    if record.slug.trim().is_empty() {
        return Err(ImportError::MissingKey {
            kind: "static page",
            field: "slug",
        });
    }
    let locale = effective_locale(record.locale.as_deref(), locale);
    let existing = store.find_static_page_by_slug(&record.slug).await?;

    let data = StaticPageData {
        slug: record.slug.clone(),
        is_published: record.is_published,
        published_at: publish_timestamp(
            None,
            record.is_published,
            existing.as_ref().and_then(|p| p.published_at),
        ),
    };
    let translation = StaticPageTranslationData {
        title: record.title.clone(),
        content: record.content.clone(),
        meta_title: non_blank(record.meta_title.as_ref()),
        meta_description: non_blank(record.meta_description.as_ref()),
    };

    let (id, outcome) = match existing {
        Some(existing) => {
            store.update_static_page(existing.id, &data).await?;
            (existing.id, UpsertOutcome::Updated)
        }
        None => {
            let created = store.create_static_page(&data).await?;
            (created.id, UpsertOutcome::Created)
        }
    };
    store
        .upsert_static_page_translation(id, locale, &translation)
        .await?;

    Ok(outcome)
}
