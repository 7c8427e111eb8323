//! Database operations for `static_pages` and `static_page_translations`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StaticPageRow {
    pub id: i64,
    pub slug: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StaticPageTranslationRow {
    pub id: i64,
    pub static_page_id: i64,
    pub locale: String,
    pub title: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticPageData {
    pub slug: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticPageTranslationData {
    pub title: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

const STATIC_PAGE_COLUMNS: &str = "id, slug, is_published, published_at, created_at, updated_at";

/// Returns the static page with the given slug, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_static_page_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<StaticPageRow>, DbError> {
    let row = sqlx::query_as::<_, StaticPageRow>(&format!(
        "SELECT {STATIC_PAGE_COLUMNS} FROM static_pages WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// # Errors
///
/// Returns [`DbError::UniqueViolation`] if the slug is taken, or
/// [`DbError::Sqlx`] for any other failure.
pub async fn create_static_page(
    pool: &PgPool,
    data: &StaticPageData,
) -> Result<StaticPageRow, DbError> {
    sqlx::query_as::<_, StaticPageRow>(&format!(
        "INSERT INTO static_pages (slug, is_published, published_at) \
         VALUES ($1, $2, $3) \
         RETURNING {STATIC_PAGE_COLUMNS}"
    ))
    .bind(&data.slug)
    .bind(data.is_published)
    .bind(data.published_at)
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::from_write("static_pages", e))
}

/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_static_page(
    pool: &PgPool,
    id: i64,
    data: &StaticPageData,
) -> Result<StaticPageRow, DbError> {
    sqlx::query_as::<_, StaticPageRow>(&format!(
        "UPDATE static_pages SET \
             is_published = $2, \
             published_at = COALESCE($3, published_at), \
             updated_at   = NOW() \
         WHERE id = $1 \
         RETURNING {STATIC_PAGE_COLUMNS}"
    ))
    .bind(id)
    .bind(data.is_published)
    .bind(data.published_at)
    .fetch_optional(pool)
    .await
    .map_err(|e| DbError::from_write("static_pages", e))?
    .ok_or(DbError::NotFound)
}

/// Creates or updates the translation for `(static_page_id, locale)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_static_page_translation(
    pool: &PgPool,
    static_page_id: i64,
    locale: &str,
    data: &StaticPageTranslationData,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO static_page_translations \
             (static_page_id, locale, title, content, meta_title, meta_description) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (static_page_id, locale) DO UPDATE SET \
             title            = EXCLUDED.title, \
             content          = EXCLUDED.content, \
             meta_title       = COALESCE(EXCLUDED.meta_title, static_page_translations.meta_title), \
             meta_description = COALESCE(EXCLUDED.meta_description, static_page_translations.meta_description), \
             updated_at       = NOW()",
    )
    .bind(static_page_id)
    .bind(locale)
    .bind(&data.title)
    .bind(&data.content)
    .bind(&data.meta_title)
    .bind(&data.meta_description)
    .execute(pool)
    .await
    .map_err(|e| DbError::from_write("static_page_translations", e))?;

    Ok(())
}
