//! Database operations for `tags`, `tag_translations`, and `product_tags`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `tags` table. `slug` is derived from the tag name.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TagRow {
    pub id: i64,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TagTranslationRow {
    pub id: i64,
    pub tag_id: i64,
    pub locale: String,
    pub name: String,
}

/// Returns the tag with the given slug, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_tag_by_slug(pool: &PgPool, slug: &str) -> Result<Option<TagRow>, DbError> {
    let row = sqlx::query_as::<_, TagRow>("SELECT id, slug, created_at FROM tags WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// # Errors
///
/// Returns [`DbError::UniqueViolation`] if the slug is taken, or
/// [`DbError::Sqlx`] for any other failure.
pub async fn create_tag(pool: &PgPool, slug: &str) -> Result<TagRow, DbError> {
    sqlx::query_as::<_, TagRow>(
        "INSERT INTO tags (slug) VALUES ($1) RETURNING id, slug, created_at",
    )
    .bind(slug)
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::from_write("tags", e))
}

/// Creates the `(tag_id, locale)` translation if it does not exist yet.
/// An existing translation is left untouched.
///
/// Returns `true` if a row was inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn ensure_tag_translation(
    pool: &PgPool,
    tag_id: i64,
    locale: &str,
    name: &str,
) -> Result<bool, DbError> {
    let inserted = sqlx::query(
        "INSERT INTO tag_translations (tag_id, locale, name) VALUES ($1, $2, $3) \
         ON CONFLICT (tag_id, locale) DO NOTHING",
    )
    .bind(tag_id)
    .bind(locale)
    .bind(name)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(inserted > 0)
}

/// Links a product to a tag if the link does not exist yet.
///
/// Returns `true` if a link row was inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn link_product_tag(pool: &PgPool, product_id: i64, tag_id: i64) -> Result<bool, DbError> {
    let inserted = sqlx::query(
        "INSERT INTO product_tags (product_id, tag_id) VALUES ($1, $2) \
         ON CONFLICT (product_id, tag_id) DO NOTHING",
    )
    .bind(product_id)
    .bind(tag_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(inserted > 0)
}
