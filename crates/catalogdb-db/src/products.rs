//! Database operations for `products`, `product_translations`, and the
//! nested `product_images`, `product_specifications`, and `product_assets`
//! collections.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table. `sku` is the natural key.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub sku: String,
    pub category_id: Option<i64>,
    pub is_published: bool,
    pub is_featured: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `product_translations` table.
///
/// Unique on `(product_id, locale)` and on `(locale, slug)`: a product slug
/// is unique within a locale, not globally.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductTranslationRow {
    pub id: i64,
    pub product_id: i64,
    pub locale: String,
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductImageRow {
    pub id: i64,
    pub product_id: i64,
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductSpecificationRow {
    pub id: i64,
    pub product_id: i64,
    pub key: String,
    pub value: String,
    pub unit: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductAssetRow {
    pub id: i64,
    pub product_id: i64,
    pub asset_type: String,
    pub url: String,
    pub file_name: Option<String>,
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Write inputs
// ---------------------------------------------------------------------------

/// Root product fields. On update, `category_id = None` keeps the stored
/// category.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub sku: String,
    pub category_id: Option<i64>,
    pub is_published: bool,
    pub is_featured: bool,
    pub position: i32,
}

/// Locale-specific product fields; `None` optionals never clobber stored
/// values on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTranslationData {
    pub name: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProductImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProductSpecification {
    pub key: String,
    pub value: String,
    pub unit: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProductAsset {
    pub asset_type: String,
    pub url: String,
    pub file_name: Option<String>,
    pub title: Option<String>,
}

const PRODUCT_COLUMNS: &str =
    "id, sku, category_id, is_published, is_featured, position, created_at, updated_at";

// ---------------------------------------------------------------------------
// products operations
// ---------------------------------------------------------------------------

/// Returns the product with the given SKU, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_product_by_sku(pool: &PgPool, sku: &str) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1"
    ))
    .bind(sku)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Inserts a new product row.
///
/// # Errors
///
/// Returns [`DbError::UniqueViolation`] if the SKU is taken, or
/// [`DbError::Sqlx`] for any other failure.
pub async fn create_product(pool: &PgPool, data: &ProductData) -> Result<ProductRow, DbError> {
    sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO products (sku, category_id, is_published, is_featured, position) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&data.sku)
    .bind(data.category_id)
    .bind(data.is_published)
    .bind(data.is_featured)
    .bind(data.position)
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::from_write("products", e))
}

/// Updates the mutable fields of an existing product in place.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    data: &ProductData,
) -> Result<ProductRow, DbError> {
    sqlx::query_as::<_, ProductRow>(&format!(
        "UPDATE products SET \
             category_id  = COALESCE($2, category_id), \
             is_published = $3, \
             is_featured  = $4, \
             position     = $5, \
             updated_at   = NOW() \
         WHERE id = $1 \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(data.category_id)
    .bind(data.is_published)
    .bind(data.is_featured)
    .bind(data.position)
    .fetch_optional(pool)
    .await
    .map_err(|e| DbError::from_write("products", e))?
    .ok_or(DbError::NotFound)
}

/// Creates or updates the translation for `(product_id, locale)`.
///
/// # Errors
///
/// Returns [`DbError::UniqueViolation`] if another product already owns
/// the slug in this locale, or [`DbError::Sqlx`] for any other failure.
pub async fn upsert_product_translation(
    pool: &PgPool,
    product_id: i64,
    locale: &str,
    data: &ProductTranslationData,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO product_translations \
             (product_id, locale, name, slug, short_description, description, \
              features, applications, meta_title, meta_description) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (product_id, locale) DO UPDATE SET \
             name              = EXCLUDED.name, \
             slug              = EXCLUDED.slug, \
             short_description = COALESCE(EXCLUDED.short_description, product_translations.short_description), \
             description       = COALESCE(EXCLUDED.description, product_translations.description), \
             features          = COALESCE(EXCLUDED.features, product_translations.features), \
             applications      = COALESCE(EXCLUDED.applications, product_translations.applications), \
             meta_title        = COALESCE(EXCLUDED.meta_title, product_translations.meta_title), \
             meta_description  = COALESCE(EXCLUDED.meta_description, product_translations.meta_description), \
             updated_at        = NOW()",
    )
    .bind(product_id)
    .bind(locale)
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.short_description)
    .bind(&data.description)
    .bind(&data.features)
    .bind(&data.applications)
    .bind(&data.meta_title)
    .bind(&data.meta_description)
    .execute(pool)
    .await
    .map_err(|e| DbError::from_write("product_translations", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// nested collections
// ---------------------------------------------------------------------------

/// Deletes every image of a product. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product_images(pool: &PgPool, product_id: i64) -> Result<u64, DbError> {
    let removed = sqlx::query("DELETE FROM product_images WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(removed)
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_product_image(
    pool: &PgPool,
    product_id: i64,
    image: &NewProductImage,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO product_images (product_id, url, alt_text, is_primary, position) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product_id)
    .bind(&image.url)
    .bind(&image.alt_text)
    .bind(image.is_primary)
    .bind(image.position)
    .execute(pool)
    .await?;

    Ok(())
}

/// Deletes every specification of a product. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product_specifications(pool: &PgPool, product_id: i64) -> Result<u64, DbError> {
    let removed = sqlx::query("DELETE FROM product_specifications WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(removed)
}

/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_product_specification(
    pool: &PgPool,
    product_id: i64,
    spec: &NewProductSpecification,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO product_specifications (product_id, key, value, unit, position) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product_id)
    .bind(&spec.key)
    .bind(&spec.value)
    .bind(&spec.unit)
    .bind(spec.position)
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends an asset. Assets are never cleared by the importer.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_product_asset(
    pool: &PgPool,
    product_id: i64,
    asset: &NewProductAsset,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO product_assets (product_id, asset_type, url, file_name, title) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product_id)
    .bind(&asset.asset_type)
    .bind(&asset.url)
    .bind(&asset.file_name)
    .bind(&asset.title)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns a product's specifications ordered by `position`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_product_specifications(
    pool: &PgPool,
    product_id: i64,
) -> Result<Vec<ProductSpecificationRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductSpecificationRow>(
        "SELECT id, product_id, key, value, unit, position \
         FROM product_specifications \
         WHERE product_id = $1 \
         ORDER BY position, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
