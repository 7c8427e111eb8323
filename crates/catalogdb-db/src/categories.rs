//! Database operations for `categories` and `category_translations`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub slug: String,
    /// Materialized hierarchy path, e.g. `"/coatings/ceramic"`.
    pub path: String,
    pub parent_id: Option<i64>,
    pub icon_url: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub is_published: bool,
    pub show_in_menu: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `category_translations` table. Unique on
/// `(category_id, locale)`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CategoryTranslationRow {
    pub id: i64,
    pub category_id: i64,
    pub locale: String,
    pub name: String,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

// ---------------------------------------------------------------------------
// Write inputs
// ---------------------------------------------------------------------------

/// Root category fields written on create and update.
///
/// On update, `None` for `parent_id`, `icon_url`, or `image_url` leaves the
/// stored value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryData {
    pub slug: String,
    pub path: String,
    pub parent_id: Option<i64>,
    pub icon_url: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub is_published: bool,
    pub show_in_menu: bool,
}

/// Locale-specific category fields. `None` optionals never clobber stored
/// values when the translation already exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTranslationData {
    pub name: String,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

const CATEGORY_COLUMNS: &str = "id, slug, path, parent_id, icon_url, image_url, position, \
                                is_published, show_in_menu, created_at, updated_at";

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Returns the category with the given slug, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_category_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<CategoryRow>, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a new category row.
///
/// # Errors
///
/// Returns [`DbError::UniqueViolation`] if the slug is taken, or
/// [`DbError::Sqlx`] for any other failure.
pub async fn create_category(pool: &PgPool, data: &CategoryData) -> Result<CategoryRow, DbError> {
    sqlx::query_as::<_, CategoryRow>(&format!(
        "INSERT INTO categories \
             (slug, path, parent_id, icon_url, image_url, position, is_published, show_in_menu) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(&data.slug)
    .bind(&data.path)
    .bind(data.parent_id)
    .bind(&data.icon_url)
    .bind(&data.image_url)
    .bind(data.position)
    .bind(data.is_published)
    .bind(data.show_in_menu)
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::from_write("categories", e))
}

/// Updates the mutable fields of an existing category in place.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_category(
    pool: &PgPool,
    id: i64,
    data: &CategoryData,
) -> Result<CategoryRow, DbError> {
    sqlx::query_as::<_, CategoryRow>(&format!(
        "UPDATE categories SET \
             path         = $2, \
             parent_id    = COALESCE($3, parent_id), \
             icon_url     = COALESCE($4, icon_url), \
             image_url    = COALESCE($5, image_url), \
             position     = $6, \
             is_published = $7, \
             show_in_menu = $8, \
             updated_at   = NOW() \
         WHERE id = $1 \
         RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(id)
    .bind(&data.path)
    .bind(data.parent_id)
    .bind(&data.icon_url)
    .bind(&data.image_url)
    .bind(data.position)
    .bind(data.is_published)
    .bind(data.show_in_menu)
    .fetch_optional(pool)
    .await
    .map_err(|e| DbError::from_write("categories", e))?
    .ok_or(DbError::NotFound)
}

/// Creates or updates the translation for `(category_id, locale)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_category_translation(
    pool: &PgPool,
    category_id: i64,
    locale: &str,
    data: &CategoryTranslationData,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO category_translations \
             (category_id, locale, name, description, meta_title, meta_description) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (category_id, locale) DO UPDATE SET \
             name             = EXCLUDED.name, \
             description      = COALESCE(EXCLUDED.description, category_translations.description), \
             meta_title       = COALESCE(EXCLUDED.meta_title, category_translations.meta_title), \
             meta_description = COALESCE(EXCLUDED.meta_description, category_translations.meta_description), \
             updated_at       = NOW()",
    )
    .bind(category_id)
    .bind(locale)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.meta_title)
    .bind(&data.meta_description)
    .execute(pool)
    .await
    .map_err(|e| DbError::from_write("category_translations", e))?;

    Ok(())
}
