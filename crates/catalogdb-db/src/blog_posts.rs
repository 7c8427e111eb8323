//! Database operations for `blog_posts` and `blog_post_translations`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BlogPostRow {
    pub id: i64,
    pub slug: String,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BlogPostTranslationRow {
    pub id: i64,
    pub blog_post_id: i64,
    pub locale: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// Root blog post fields. On update, `None` optionals keep stored values.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostData {
    pub slug: String,
    pub cover_image_url: Option<String>,
    pub author: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostTranslationData {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

const BLOG_POST_COLUMNS: &str = "id, slug, cover_image_url, author, is_published, published_at, \
                                 created_at, updated_at";

/// Returns the blog post with the given slug, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_blog_post_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<BlogPostRow>, DbError> {
    let row = sqlx::query_as::<_, BlogPostRow>(&format!(
        "SELECT {BLOG_POST_COLUMNS} FROM blog_posts WHERE slug = $1"
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
pub async fn create_blog_post(pool: &PgPool, data: &BlogPostData) -> Result<BlogPostRow, DbError> {
    sqlx::query_as::<_, BlogPostRow>(&format!(
        "INSERT INTO blog_posts (slug, cover_image_url, author, is_published, published_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {BLOG_POST_COLUMNS}"
    ))
    .bind(&data.slug)
    .bind(&data.cover_image_url)
    .bind(&data.author)
    .bind(data.is_published)
    .bind(data.published_at)
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::from_write("blog_posts", e))
}

/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_blog_post(
    pool: &PgPool,
    id: i64,
    data: &BlogPostData,
) -> Result<BlogPostRow, DbError> {
    sqlx::query_as::<_, BlogPostRow>(&format!(
        "UPDATE blog_posts SET \
             cover_image_url = COALESCE($2, cover_image_url), \
             author          = COALESCE($3, author), \
             is_published    = $4, \
             published_at    = COALESCE($5, published_at), \
             updated_at      = NOW() \
         WHERE id = $1 \
         RETURNING {BLOG_POST_COLUMNS}"
    ))
    .bind(id)
    .bind(&data.cover_image_url)
    .bind(&data.author)
    .bind(data.is_published)
    .bind(data.published_at)
    .fetch_optional(pool)
    .await
    .map_err(|e| DbError::from_write("blog_posts", e))?
    .ok_or(DbError::NotFound)
}

/// Creates or updates the translation for `(blog_post_id, locale)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_blog_post_translation(
    pool: &PgPool,
    blog_post_id: i64,
    locale: &str,
    data: &BlogPostTranslationData,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO blog_post_translations \
             (blog_post_id, locale, title, excerpt, content, meta_title, meta_description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (blog_post_id, locale) DO UPDATE SET \
             title            = EXCLUDED.title, \
             excerpt          = COALESCE(EXCLUDED.excerpt, blog_post_translations.excerpt), \
             content          = EXCLUDED.content, \
             meta_title       = COALESCE(EXCLUDED.meta_title, blog_post_translations.meta_title), \
             meta_description = COALESCE(EXCLUDED.meta_description, blog_post_translations.meta_description), \
             updated_at       = NOW()",
    )
    .bind(blog_post_id)
    .bind(locale)
    .bind(&data.title)
    .bind(&data.excerpt)
    .bind(&data.content)
    .bind(&data.meta_title)
    .bind(&data.meta_description)
    .execute(pool)
    .await
    .map_err(|e| DbError::from_write("blog_post_translations", e))?;

    Ok(())
}
