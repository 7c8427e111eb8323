use catalogdb_core::ScrapedBlogPost;
use catalogdb_db::{BlogPostData, BlogPostTranslationData, CatalogStore};

use super::{effective_locale, non_blank, publish_timestamp, UpsertOutcome};
use crate::error::ImportError;
use crate::normalize::{clean_text, truncate_text, DEFAULT_TRUNCATE_LEN};

/// Creates or updates a blog post and its translation for the locale.
///
/// Without a scraped excerpt, one is derived from the cleaned content.
///
/// # Errors
///
/// Returns [`ImportError::MissingKey`] for an empty slug, or
/// [`ImportError::Db`] if any store call fails.
pub async fn upsert_blog_post<S: CatalogStore + ?Sized>(
    store: &S,
    record: &ScrapedBlogPost,
    locale: &str,
) -> Result<UpsertOutcome, ImportError> {
    if record.slug.trim().is_empty() {
        return Err(ImportError::MissingKey {
            kind: "blog post",
            field: "slug",
        });
    }
    let locale = effective_locale(record.locale.as_deref(), locale);
    let existing = store.find_blog_post_by_slug(&record.slug).await?;

    let data = BlogPostData {
        slug: record.slug.clone(),
        cover_image_url: non_blank(record.cover_image_url.as_ref()),
        author: non_blank(record.author.as_ref()),
        is_published: record.is_published,
        published_at: publish_timestamp(
            record.published_at,
            record.is_published,
            existing.as_ref().and_then(|p| p.published_at),
        ),
    };
    let excerpt = non_blank(record.excerpt.as_ref()).or_else(|| {
        let derived = truncate_text(&clean_text(&record.content), DEFAULT_TRUNCATE_LEN);
        (!derived.is_empty()).then_some(derived)
    });
    let translation = BlogPostTranslationData {
        title: record.title.clone(),
        excerpt,
        content: record.content.clone(),
        meta_title: non_blank(record.meta_title.as_ref()),
        meta_description: non_blank(record.meta_description.as_ref()),
    };

    let (id, outcome) = match existing {
        Some(existing) => {
            store.update_blog_post(existing.id, &data).await?;
            (existing.id, UpsertOutcome::Updated)
        }
        None => {
            let created = store.create_blog_post(&data).await?;
            (created.id, UpsertOutcome::Created)
        }
    };
    store
        .upsert_blog_post_translation(id, locale, &translation)
        .await?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_db::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn record(slug: &str) -> ScrapedBlogPost {
        ScrapedBlogPost {
            slug: slug.to_string(),
            title: "Launch".to_string(),
            excerpt: None,
            content: "We&nbsp;are   launching a new line.".to_string(),
            cover_image_url: None,
            author: None,
            meta_title: None,
            meta_description: None,
            is_published: true,
            published_at: None,
            locale: None,
        }
    }

    #[tokio::test]
    async fn excerpt_is_derived_from_content() {
        let store = MemoryStore::new();
        upsert_blog_post(&store, &record("launch"), "en")
            .await
            .unwrap();

        let post = store.find_blog_post_by_slug("launch").await.unwrap().unwrap();
        let translation = store.blog_post_translation(post.id, "en").await.unwrap();
        assert_eq!(
            translation.excerpt.as_deref(),
            Some("We are launching a new line.")
        );
    }

    #[tokio::test]
    async fn published_post_is_stamped_once() {
        let store = MemoryStore::new();
        upsert_blog_post(&store, &record("launch"), "en")
            .await
            .unwrap();
        let first = store.find_blog_post_by_slug("launch").await.unwrap().unwrap();
        assert!(first.published_at.is_some());

        let outcome = upsert_blog_post(&store, &record("launch"), "en")
            .await
            .unwrap();
        let second = store.find_blog_post_by_slug("launch").await.unwrap().unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(second.published_at, first.published_at);
    }

    #[tokio::test]
    async fn explicit_published_at_overwrites() {
        let store = MemoryStore::new();
        upsert_blog_post(&store, &record("launch"), "en")
            .await
            .unwrap();

        let when = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let mut dated = record("launch");
        dated.published_at = Some(when);
        upsert_blog_post(&store, &dated, "en").await.unwrap();

        let post = store.find_blog_post_by_slug("launch").await.unwrap().unwrap();
        assert_eq!(post.published_at, Some(when));
    }

    #[tokio::test]
    async fn draft_is_not_stamped() {
        let store = MemoryStore::new();
        let mut draft = record("draft");
        draft.is_published = false;
        upsert_blog_post(&store, &draft, "en").await.unwrap();

        let post = store.find_blog_post_by_slug("draft").await.unwrap().unwrap();
        assert!(post.published_at.is_none());
    }
}
