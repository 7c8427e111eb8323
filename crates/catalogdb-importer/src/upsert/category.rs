use catalogdb_core::ScrapedCategory;
use catalogdb_db::{CatalogStore, CategoryData, CategoryTranslationData};

use super::{effective_locale, non_blank, UpsertOutcome};
use crate::error::ImportError;

/// Creates or updates a category and its translation for the locale.
///
/// `parent_slug` is resolved against categories already stored, so parents
/// must be imported before their children. An unresolved parent is logged
/// and left unset; on update that keeps the stored parent.
///
/// # Errors
///
/// Returns [`ImportError::MissingKey`] for an empty slug, or
/// [`ImportError::Db`] if any store call fails.
pub async fn upsert_category<S: CatalogStore + ?Sized>(
    store: &S,
    record: &ScrapedCategory,
    locale: &str,
) -> Result<UpsertOutcome, ImportError> {
    if record.slug.trim().is_empty() {
        return Err(ImportError::MissingKey {
            kind: "category",
            field: "slug",
        });
    }
    let locale = effective_locale(record.locale.as_deref(), locale);

    let parent_id = match record
        .parent_slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(parent_slug) if parent_slug == record.slug => {
            tracing::warn!(slug = %record.slug, "category names itself as parent; ignoring");
            None
        }
        Some(parent_slug) => {
            let parent = store.find_category_by_slug(parent_slug).await?;
            if parent.is_none() {
                tracing::warn!(
                    slug = %record.slug,
                    parent_slug,
                    "parent category not found; leaving parent unset"
                );
            }
            parent.map(|p| p.id)
        }
        None => None,
    };

    let data = CategoryData {
        slug: record.slug.clone(),
        path: record.path.clone(),
        parent_id,
        icon_url: non_blank(record.icon_url.as_ref()),
        image_url: non_blank(record.image_url.as_ref()),
        position: record.position,
        is_published: record.is_published,
        show_in_menu: record.show_in_menu,
    };
    let translation = CategoryTranslationData {
        name: record.name.clone(),
        description: non_blank(record.description.as_ref()),
        meta_title: non_blank(record.meta_title.as_ref()),
        meta_description: non_blank(record.meta_description.as_ref()),
    };

    if let Some(existing) = store.find_category_by_slug(&record.slug).await? {
        store.update_category(existing.id, &data).await?;
        store
            .upsert_category_translation(existing.id, locale, &translation)
            .await?;
        return Ok(UpsertOutcome::Updated);
    }

    let created = store.create_category(&data).await?;
    store
        .upsert_category_translation(created.id, locale, &translation)
        .await?;
    tracing::debug!(slug = %record.slug, id = created.id, "created category");
    Ok(UpsertOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_db::MemoryStore;

    fn record(slug: &str, parent_slug: Option<&str>) -> ScrapedCategory {
        ScrapedCategory {
            slug: slug.to_string(),
            path: format!("/{slug}"),
            parent_slug: parent_slug.map(str::to_string),
            name: slug.to_uppercase(),
            description: None,
            meta_title: None,
            meta_description: None,
            icon_url: None,
            image_url: None,
            position: 0,
            is_published: true,
            show_in_menu: true,
            locale: None,
        }
    }

    #[tokio::test]
    async fn child_resolves_parent_created_earlier() {
        let store = MemoryStore::new();
        upsert_category(&store, &record("coatings", None), "en")
            .await
            .unwrap();
        upsert_category(&store, &record("ceramic", Some("coatings")), "en")
            .await
            .unwrap();

        let parent = store.find_category_by_slug("coatings").await.unwrap().unwrap();
        let child = store.find_category_by_slug("ceramic").await.unwrap().unwrap();
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[tokio::test]
    async fn unknown_parent_is_left_unset() {
        let store = MemoryStore::new();
        let outcome = upsert_category(&store, &record("orphan", Some("missing")), "en")
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Created);
        let orphan = store.find_category_by_slug("orphan").await.unwrap().unwrap();
        assert!(orphan.parent_id.is_none());
    }

    #[tokio::test]
    async fn second_locale_adds_translation_without_new_root() {
        let store = MemoryStore::new();
        let first = upsert_category(&store, &record("coatings", None), "en")
            .await
            .unwrap();
        let mut german = record("coatings", None);
        german.name = "Beschichtungen".to_string();
        let second = upsert_category(&store, &german, "de").await.unwrap();

        assert_eq!(first, UpsertOutcome::Created);
        assert_eq!(second, UpsertOutcome::Updated);
        let counts = store.counts().await;
        assert_eq!(counts.categories, 1);
        assert_eq!(counts.category_translations, 2);

        let row = store.find_category_by_slug("coatings").await.unwrap().unwrap();
        let de = store.category_translation(row.id, "de").await.unwrap();
        assert_eq!(de.name, "Beschichtungen");
    }

    #[tokio::test]
    async fn record_locale_overrides_run_locale() {
        let store = MemoryStore::new();
        let mut french = record("coatings", None);
        french.locale = Some("fr".to_string());
        upsert_category(&store, &french, "en").await.unwrap();

        let row = store.find_category_by_slug("coatings").await.unwrap().unwrap();
        assert!(store.category_translation(row.id, "fr").await.is_some());
        assert!(store.category_translation(row.id, "en").await.is_none());
    }

    #[tokio::test]
    async fn empty_slug_is_missing_key() {
        let store = MemoryStore::new();
        let err = upsert_category(&store, &record("  ", None), "en")
            .await
            .expect_err("blank slug should be rejected");
        assert!(matches!(err, ImportError::MissingKey { kind: "category", .. }));
        assert_eq!(store.counts().await.categories, 0);
    }
}
