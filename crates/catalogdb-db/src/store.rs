//! The record-storage boundary the importer writes through.
//!
//! [`CatalogStore`] exposes lookup-by-natural-key, create, update, and
//! translation upsert per entity kind, plus the delete-many operations used
//! to replace nested product collections. Every call commits on its own;
//! callers get no transaction spanning several calls.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::blog_posts::{self, BlogPostData, BlogPostRow, BlogPostTranslationData};
use crate::categories::{self, CategoryData, CategoryRow, CategoryTranslationData};
use crate::products::{
    self, NewProductAsset, NewProductImage, NewProductSpecification, ProductData, ProductRow,
    ProductTranslationData,
};
use crate::static_pages::{self, StaticPageData, StaticPageRow, StaticPageTranslationData};
use crate::tags::{self, TagRow};
use crate::DbError;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // -- categories ---------------------------------------------------------

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<CategoryRow>, DbError>;

    async fn create_category(&self, data: &CategoryData) -> Result<CategoryRow, DbError>;

    async fn update_category(&self, id: i64, data: &CategoryData) -> Result<CategoryRow, DbError>;

    async fn upsert_category_translation(
        &self,
        category_id: i64,
        locale: &str,
        data: &CategoryTranslationData,
    ) -> Result<(), DbError>;

    // -- products -----------------------------------------------------------

    async fn find_product_by_sku(&self, sku: &str) -> Result<Option<ProductRow>, DbError>;

    async fn create_product(&self, data: &ProductData) -> Result<ProductRow, DbError>;

    async fn update_product(&self, id: i64, data: &ProductData) -> Result<ProductRow, DbError>;

    async fn upsert_product_translation(
        &self,
        product_id: i64,
        locale: &str,
        data: &ProductTranslationData,
    ) -> Result<(), DbError>;

    async fn delete_product_images(&self, product_id: i64) -> Result<u64, DbError>;

    async fn create_product_image(
        &self,
        product_id: i64,
        image: &NewProductImage,
    ) -> Result<(), DbError>;

    async fn delete_product_specifications(&self, product_id: i64) -> Result<u64, DbError>;

    async fn create_product_specification(
        &self,
        product_id: i64,
        spec: &NewProductSpecification,
    ) -> Result<(), DbError>;

    async fn create_product_asset(
        &self,
        product_id: i64,
        asset: &NewProductAsset,
    ) -> Result<(), DbError>;

    // -- tags ---------------------------------------------------------------

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<TagRow>, DbError>;

    async fn create_tag(&self, slug: &str) -> Result<TagRow, DbError>;

    /// Creates the translation if missing; never overwrites an existing one.
    async fn ensure_tag_translation(
        &self,
        tag_id: i64,
        locale: &str,
        name: &str,
    ) -> Result<bool, DbError>;

    /// Creates the product–tag link if missing; returns `true` on insert.
    async fn link_product_tag(&self, product_id: i64, tag_id: i64) -> Result<bool, DbError>;

    // -- blog posts ---------------------------------------------------------

    async fn find_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostRow>, DbError>;

    async fn create_blog_post(&self, data: &BlogPostData) -> Result<BlogPostRow, DbError>;

    async fn update_blog_post(&self, id: i64, data: &BlogPostData)
        -> Result<BlogPostRow, DbError>;

    async fn upsert_blog_post_translation(
        &self,
        blog_post_id: i64,
        locale: &str,
        data: &BlogPostTranslationData,
    ) -> Result<(), DbError>;

    // -- static pages -------------------------------------------------------

    async fn find_static_page_by_slug(&self, slug: &str)
        -> Result<Option<StaticPageRow>, DbError>;

    async fn create_static_page(&self, data: &StaticPageData) -> Result<StaticPageRow, DbError>;

    async fn update_static_page(
        &self,
        id: i64,
        data: &StaticPageData,
    ) -> Result<StaticPageRow, DbError>;

    async fn upsert_static_page_translation(
        &self,
        static_page_id: i64,
        locale: &str,
        data: &StaticPageTranslationData,
    ) -> Result<(), DbError>;
}

/// [`CatalogStore`] backed by a Postgres pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<CategoryRow>, DbError> {
        categories::find_category_by_slug(&self.pool, slug).await
    }

    async fn create_category(&self, data: &CategoryData) -> Result<CategoryRow, DbError> {
        categories::create_category(&self.pool, data).await
    }

    async fn update_category(&self, id: i64, data: &CategoryData) -> Result<CategoryRow, DbError> {
        categories::update_category(&self.pool, id, data).await
    }

    async fn upsert_category_translation(
        &self,
        category_id: i64,
        locale: &str,
        data: &CategoryTranslationData,
    ) -> Result<(), DbError> {
        categories::upsert_category_translation(&self.pool, category_id, locale, data).await
    }

    async fn find_product_by_sku(&self, sku: &str) -> Result<Option<ProductRow>, DbError> {
        products::find_product_by_sku(&self.pool, sku).await
    }

    async fn create_product(&self, data: &ProductData) -> Result<ProductRow, DbError> {
        products::create_product(&self.pool, data).await
    }

    async fn update_product(&self, id: i64, data: &ProductData) -> Result<ProductRow, DbError> {
        products::update_product(&self.pool, id, data).await
    }

    async fn upsert_product_translation(
        &self,
        product_id: i64,
        locale: &str,
        data: &ProductTranslationData,
    ) -> Result<(), DbError> {
        products::upsert_product_translation(&self.pool, product_id, locale, data).await
    }

    async fn delete_product_images(&self, product_id: i64) -> Result<u64, DbError> {
        products::delete_product_images(&self.pool, product_id).await
    }

    async fn create_product_image(
        &self,
        product_id: i64,
        image: &NewProductImage,
    ) -> Result<(), DbError> {
        products::create_product_image(&self.pool, product_id, image).await
    }

    async fn delete_product_specifications(&self, product_id: i64) -> Result<u64, DbError> {
        products::delete_product_specifications(&self.pool, product_id).await
    }

    async fn create_product_specification(
        &self,
        product_id: i64,
        spec: &NewProductSpecification,
    ) -> Result<(), DbError> {
        products::create_product_specification(&self.pool, product_id, spec).await
    }

    async fn create_product_asset(
        &self,
        product_id: i64,
        asset: &NewProductAsset,
    ) -> Result<(), DbError> {
        products::create_product_asset(&self.pool, product_id, asset).await
    }

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<TagRow>, DbError> {
        tags::find_tag_by_slug(&self.pool, slug).await
    }

    async fn create_tag(&self, slug: &str) -> Result<TagRow, DbError> {
        tags::create_tag(&self.pool, slug).await
    }

    async fn ensure_tag_translation(
        &self,
        tag_id: i64,
        locale: &str,
        name: &str,
    ) -> Result<bool, DbError> {
        tags::ensure_tag_translation(&self.pool, tag_id, locale, name).await
    }

    async fn link_product_tag(&self, product_id: i64, tag_id: i64) -> Result<bool, DbError> {
        tags::link_product_tag(&self.pool, product_id, tag_id).await
    }

    async fn find_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostRow>, DbError> {
        blog_posts::find_blog_post_by_slug(&self.pool, slug).await
    }

    async fn create_blog_post(&self, data: &BlogPostData) -> Result<BlogPostRow, DbError> {
        blog_posts::create_blog_post(&self.pool, data).await
    }

    async fn update_blog_post(
        &self,
        id: i64,
        data: &BlogPostData,
    ) -> Result<BlogPostRow, DbError> {
        blog_posts::update_blog_post(&self.pool, id, data).await
    }

    async fn upsert_blog_post_translation(
        &self,
        blog_post_id: i64,
        locale: &str,
        data: &BlogPostTranslationData,
    ) -> Result<(), DbError> {
        blog_posts::upsert_blog_post_translation(&self.pool, blog_post_id, locale, data).await
    }

    async fn find_static_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<StaticPageRow>, DbError> {
        static_pages::find_static_page_by_slug(&self.pool, slug).await
    }

    async fn create_static_page(&self, data: &StaticPageData) -> Result<StaticPageRow, DbError> {
        static_pages::create_static_page(&self.pool, data).await
    }

    async fn update_static_page(
        &self,
        id: i64,
        data: &StaticPageData,
    ) -> Result<StaticPageRow, DbError> {
        static_pages::update_static_page(&self.pool, id, data).await
    }

    async fn upsert_static_page_translation(
        &self,
        static_page_id: i64,
        locale: &str,
        data: &StaticPageTranslationData,
    ) -> Result<(), DbError> {
        static_pages::upsert_static_page_translation(&self.pool, static_page_id, locale, data)
            .await
    }
}
