//! In-process [`CatalogStore`] used for dry runs and tests.
//!
//! Mirrors the Postgres schema's unique constraints (category slug, product
//! SKU, product slug per locale, tag slug, post slug, page slug) and the
//! partial-update rules of the SQL upserts, so an import that succeeds here
//! exercises the same invariants it would against the database.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::blog_posts::{BlogPostData, BlogPostRow, BlogPostTranslationData, BlogPostTranslationRow};
use crate::categories::{CategoryData, CategoryRow, CategoryTranslationData, CategoryTranslationRow};
use crate::products::{
    NewProductAsset, NewProductImage, NewProductSpecification, ProductAssetRow, ProductData,
    ProductImageRow, ProductRow, ProductSpecificationRow, ProductTranslationData,
    ProductTranslationRow,
};
use crate::static_pages::{
    StaticPageData, StaticPageRow, StaticPageTranslationData, StaticPageTranslationRow,
};
use crate::store::CatalogStore;
use crate::tags::{TagRow, TagTranslationRow};
use crate::DbError;

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    categories: Vec<CategoryRow>,
    category_translations: Vec<CategoryTranslationRow>,
    products: Vec<ProductRow>,
    product_translations: Vec<ProductTranslationRow>,
    product_images: Vec<ProductImageRow>,
    product_specifications: Vec<ProductSpecificationRow>,
    product_assets: Vec<ProductAssetRow>,
    tags: Vec<TagRow>,
    tag_translations: Vec<TagTranslationRow>,
    product_tags: BTreeSet<(i64, i64)>,
    blog_posts: Vec<BlogPostRow>,
    blog_post_translations: Vec<BlogPostTranslationRow>,
    static_pages: Vec<StaticPageRow>,
    static_page_translations: Vec<StaticPageTranslationRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Row counts per table, for reporting and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub categories: usize,
    pub category_translations: usize,
    pub products: usize,
    pub product_translations: usize,
    pub product_images: usize,
    pub product_specifications: usize,
    pub product_assets: usize,
    pub tags: usize,
    pub tag_translations: usize,
    pub product_tags: usize,
    pub blog_posts: usize,
    pub blog_post_translations: usize,
    pub static_pages: usize,
    pub static_page_translations: usize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

/// Overwrites `target` only when `value` carries something, matching the
/// `COALESCE(EXCLUDED.x, x)` updates of the SQL store.
fn coalesce<T: Clone>(target: &mut Option<T>, value: Option<&T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}

fn unique_violation(entity: &'static str, key: impl Into<String>) -> DbError {
    DbError::UniqueViolation {
        entity,
        key: key.into(),
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn counts(&self) -> TableCounts {
        let t = self.tables.lock().await;
        TableCounts {
            categories: t.categories.len(),
            category_translations: t.category_translations.len(),
            products: t.products.len(),
            product_translations: t.product_translations.len(),
            product_images: t.product_images.len(),
            product_specifications: t.product_specifications.len(),
            product_assets: t.product_assets.len(),
            tags: t.tags.len(),
            tag_translations: t.tag_translations.len(),
            product_tags: t.product_tags.len(),
            blog_posts: t.blog_posts.len(),
            blog_post_translations: t.blog_post_translations.len(),
            static_pages: t.static_pages.len(),
            static_page_translations: t.static_page_translations.len(),
        }
    }

    pub async fn category_translation(
        &self,
        category_id: i64,
        locale: &str,
    ) -> Option<CategoryTranslationRow> {
        let t = self.tables.lock().await;
        t.category_translations
            .iter()
            .find(|r| r.category_id == category_id && r.locale == locale)
            .cloned()
    }

    pub async fn product_translation(
        &self,
        product_id: i64,
        locale: &str,
    ) -> Option<ProductTranslationRow> {
        let t = self.tables.lock().await;
        t.product_translations
            .iter()
            .find(|r| r.product_id == product_id && r.locale == locale)
            .cloned()
    }

    /// Images of a product ordered by `position`.
    pub async fn product_images(&self, product_id: i64) -> Vec<ProductImageRow> {
        let t = self.tables.lock().await;
        let mut rows: Vec<_> = t
            .product_images
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.position, r.id));
        rows
    }

    /// Specifications of a product ordered by `position`.
    pub async fn product_specifications(&self, product_id: i64) -> Vec<ProductSpecificationRow> {
        let t = self.tables.lock().await;
        let mut rows: Vec<_> = t
            .product_specifications
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.position, r.id));
        rows
    }

    pub async fn product_assets(&self, product_id: i64) -> Vec<ProductAssetRow> {
        let t = self.tables.lock().await;
        t.product_assets
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect()
    }

    pub async fn product_tag_ids(&self, product_id: i64) -> Vec<i64> {
        let t = self.tables.lock().await;
        t.product_tags
            .iter()
            .filter(|(p, _)| *p == product_id)
            .map(|(_, tag)| *tag)
            .collect()
    }

    pub async fn tag_translation(&self, tag_id: i64, locale: &str) -> Option<TagTranslationRow> {
        let t = self.tables.lock().await;
        t.tag_translations
            .iter()
            .find(|r| r.tag_id == tag_id && r.locale == locale)
            .cloned()
    }

    pub async fn blog_post_translation(
        &self,
        blog_post_id: i64,
        locale: &str,
    ) -> Option<BlogPostTranslationRow> {
        let t = self.tables.lock().await;
        t.blog_post_translations
            .iter()
            .find(|r| r.blog_post_id == blog_post_id && r.locale == locale)
            .cloned()
    }

    pub async fn static_page_translation(
        &self,
        static_page_id: i64,
        locale: &str,
    ) -> Option<StaticPageTranslationRow> {
        let t = self.tables.lock().await;
        t.static_page_translations
            .iter()
            .find(|r| r.static_page_id == static_page_id && r.locale == locale)
            .cloned()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    // -- categories ---------------------------------------------------------

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<CategoryRow>, DbError> {
        let t = self.tables.lock().await;
        Ok(t.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create_category(&self, data: &CategoryData) -> Result<CategoryRow, DbError> {
        let mut t = self.tables.lock().await;
        if t.categories.iter().any(|c| c.slug == data.slug) {
            return Err(unique_violation("categories", &data.slug));
        }
        let now = Utc::now();
        let row = CategoryRow {
            id: t.next_id(),
            slug: data.slug.clone(),
            path: data.path.clone(),
            parent_id: data.parent_id,
            icon_url: data.icon_url.clone(),
            image_url: data.image_url.clone(),
            position: data.position,
            is_published: data.is_published,
            show_in_menu: data.show_in_menu,
            created_at: now,
            updated_at: now,
        };
        t.categories.push(row.clone());
        Ok(row)
    }

    async fn update_category(&self, id: i64, data: &CategoryData) -> Result<CategoryRow, DbError> {
        let mut t = self.tables.lock().await;
        let row = t
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DbError::NotFound)?;
        row.path.clone_from(&data.path);
        coalesce(&mut row.parent_id, data.parent_id.as_ref());
        coalesce(&mut row.icon_url, data.icon_url.as_ref());
        coalesce(&mut row.image_url, data.image_url.as_ref());
        row.position = data.position;
        row.is_published = data.is_published;
        row.show_in_menu = data.show_in_menu;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn upsert_category_translation(
        &self,
        category_id: i64,
        locale: &str,
        data: &CategoryTranslationData,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        if let Some(row) = t
            .category_translations
            .iter_mut()
            .find(|r| r.category_id == category_id && r.locale == locale)
        {
            row.name.clone_from(&data.name);
            coalesce(&mut row.description, data.description.as_ref());
            coalesce(&mut row.meta_title, data.meta_title.as_ref());
            coalesce(&mut row.meta_description, data.meta_description.as_ref());
            return Ok(());
        }
        let id = t.next_id();
        t.category_translations.push(CategoryTranslationRow {
            id,
            category_id,
            locale: locale.to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
        });
        Ok(())
    }

    // -- products -----------------------------------------------------------

    async fn find_product_by_sku(&self, sku: &str) -> Result<Option<ProductRow>, DbError> {
        let t = self.tables.lock().await;
        Ok(t.products.iter().find(|p| p.sku == sku).cloned())
    }

    async fn create_product(&self, data: &ProductData) -> Result<ProductRow, DbError> {
        let mut t = self.tables.lock().await;
        if t.products.iter().any(|p| p.sku == data.sku) {
            return Err(unique_violation("products", &data.sku));
        }
        let now = Utc::now();
        let row = ProductRow {
            id: t.next_id(),
            sku: data.sku.clone(),
            category_id: data.category_id,
            is_published: data.is_published,
            is_featured: data.is_featured,
            position: data.position,
            created_at: now,
            updated_at: now,
        };
        t.products.push(row.clone());
        Ok(row)
    }

    async fn update_product(&self, id: i64, data: &ProductData) -> Result<ProductRow, DbError> {
        let mut t = self.tables.lock().await;
        let row = t
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::NotFound)?;
        coalesce(&mut row.category_id, data.category_id.as_ref());
        row.is_published = data.is_published;
        row.is_featured = data.is_featured;
        row.position = data.position;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn upsert_product_translation(
        &self,
        product_id: i64,
        locale: &str,
        data: &ProductTranslationData,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        let slug_taken = t
            .product_translations
            .iter()
            .any(|r| r.locale == locale && r.slug == data.slug && r.product_id != product_id);
        if slug_taken {
            return Err(unique_violation(
                "product_translations",
                format!("{locale}/{}", data.slug),
            ));
        }
        if let Some(row) = t
            .product_translations
            .iter_mut()
            .find(|r| r.product_id == product_id && r.locale == locale)
        {
            row.name.clone_from(&data.name);
            row.slug.clone_from(&data.slug);
            coalesce(&mut row.short_description, data.short_description.as_ref());
            coalesce(&mut row.description, data.description.as_ref());
            coalesce(&mut row.features, data.features.as_ref());
            coalesce(&mut row.applications, data.applications.as_ref());
            coalesce(&mut row.meta_title, data.meta_title.as_ref());
            coalesce(&mut row.meta_description, data.meta_description.as_ref());
            return Ok(());
        }
        let id = t.next_id();
        t.product_translations.push(ProductTranslationRow {
            id,
            product_id,
            locale: locale.to_string(),
            name: data.name.clone(),
            slug: data.slug.clone(),
            short_description: data.short_description.clone(),
            description: data.description.clone(),
            features: data.features.clone(),
            applications: data.applications.clone(),
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
        });
        Ok(())
    }

    async fn delete_product_images(&self, product_id: i64) -> Result<u64, DbError> {
        let mut t = self.tables.lock().await;
        let before = t.product_images.len();
        t.product_images.retain(|r| r.product_id != product_id);
        Ok((before - t.product_images.len()) as u64)
    }

    async fn create_product_image(
        &self,
        product_id: i64,
        image: &NewProductImage,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();
        t.product_images.push(ProductImageRow {
            id,
            product_id,
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
            is_primary: image.is_primary,
            position: image.position,
        });
        Ok(())
    }

    async fn delete_product_specifications(&self, product_id: i64) -> Result<u64, DbError> {
        let mut t = self.tables.lock().await;
        let before = t.product_specifications.len();
        t.product_specifications.retain(|r| r.product_id != product_id);
        Ok((before - t.product_specifications.len()) as u64)
    }

    async fn create_product_specification(
        &self,
        product_id: i64,
        spec: &NewProductSpecification,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();
        t.product_specifications.push(ProductSpecificationRow {
            id,
            product_id,
            key: spec.key.clone(),
            value: spec.value.clone(),
            unit: spec.unit.clone(),
            position: spec.position,
        });
        Ok(())
    }

    async fn create_product_asset(
        &self,
        product_id: i64,
        asset: &NewProductAsset,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        let id = t.next_id();
        t.product_assets.push(ProductAssetRow {
            id,
            product_id,
            asset_type: asset.asset_type.clone(),
            url: asset.url.clone(),
            file_name: asset.file_name.clone(),
            title: asset.title.clone(),
        });
        Ok(())
    }

    // -- tags ---------------------------------------------------------------

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<TagRow>, DbError> {
        let t = self.tables.lock().await;
        Ok(t.tags.iter().find(|tag| tag.slug == slug).cloned())
    }

    async fn create_tag(&self, slug: &str) -> Result<TagRow, DbError> {
        let mut t = self.tables.lock().await;
        if t.tags.iter().any(|tag| tag.slug == slug) {
            return Err(unique_violation("tags", slug));
        }
        let row = TagRow {
            id: t.next_id(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        };
        t.tags.push(row.clone());
        Ok(row)
    }

    async fn ensure_tag_translation(
        &self,
        tag_id: i64,
        locale: &str,
        name: &str,
    ) -> Result<bool, DbError> {
        let mut t = self.tables.lock().await;
        if t
            .tag_translations
            .iter()
            .any(|r| r.tag_id == tag_id && r.locale == locale)
        {
            return Ok(false);
        }
        let id = t.next_id();
        t.tag_translations.push(TagTranslationRow {
            id,
            tag_id,
            locale: locale.to_string(),
            name: name.to_string(),
        });
        Ok(true)
    }

    async fn link_product_tag(&self, product_id: i64, tag_id: i64) -> Result<bool, DbError> {
        let mut t = self.tables.lock().await;
        Ok(t.product_tags.insert((product_id, tag_id)))
    }

    // -- blog posts ---------------------------------------------------------

    async fn find_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPostRow>, DbError> {
        let t = self.tables.lock().await;
        Ok(t.blog_posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create_blog_post(&self, data: &BlogPostData) -> Result<BlogPostRow, DbError> {
        let mut t = self.tables.lock().await;
        if t.blog_posts.iter().any(|p| p.slug == data.slug) {
            return Err(unique_violation("blog_posts", &data.slug));
        }
        let now = Utc::now();
        let row = BlogPostRow {
            id: t.next_id(),
            slug: data.slug.clone(),
            cover_image_url: data.cover_image_url.clone(),
            author: data.author.clone(),
            is_published: data.is_published,
            published_at: data.published_at,
            created_at: now,
            updated_at: now,
        };
        t.blog_posts.push(row.clone());
        Ok(row)
    }

    async fn update_blog_post(
        &self,
        id: i64,
        data: &BlogPostData,
    ) -> Result<BlogPostRow, DbError> {
        let mut t = self.tables.lock().await;
        let row = t
            .blog_posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::NotFound)?;
        coalesce(&mut row.cover_image_url, data.cover_image_url.as_ref());
        coalesce(&mut row.author, data.author.as_ref());
        row.is_published = data.is_published;
        coalesce(&mut row.published_at, data.published_at.as_ref());
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn upsert_blog_post_translation(
        &self,
        blog_post_id: i64,
        locale: &str,
        data: &BlogPostTranslationData,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        if let Some(row) = t
            .blog_post_translations
            .iter_mut()
            .find(|r| r.blog_post_id == blog_post_id && r.locale == locale)
        {
            row.title.clone_from(&data.title);
            coalesce(&mut row.excerpt, data.excerpt.as_ref());
            row.content.clone_from(&data.content);
            coalesce(&mut row.meta_title, data.meta_title.as_ref());
            coalesce(&mut row.meta_description, data.meta_description.as_ref());
            return Ok(());
        }
        let id = t.next_id();
        t.blog_post_translations.push(BlogPostTranslationRow {
            id,
            blog_post_id,
            locale: locale.to_string(),
            title: data.title.clone(),
            excerpt: data.excerpt.clone(),
            content: data.content.clone(),
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
        });
        Ok(())
    }

    // -- static pages -------------------------------------------------------

    async fn find_static_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<StaticPageRow>, DbError> {
        let t = self.tables.lock().await;
        Ok(t.static_pages.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create_static_page(&self, data: &StaticPageData) -> Result<StaticPageRow, DbError> {
        let mut t = self.tables.lock().await;
        if t.static_pages.iter().any(|p| p.slug == data.slug) {
            return Err(unique_violation("static_pages", &data.slug));
        }
        let now = Utc::now();
        let row = StaticPageRow {
            id: t.next_id(),
            slug: data.slug.clone(),
            is_published: data.is_published,
            published_at: data.published_at,
            created_at: now,
            updated_at: now,
        };
        t.static_pages.push(row.clone());
        Ok(row)
    }

    async fn update_static_page(
        &self,
        id: i64,
        data: &StaticPageData,
    ) -> Result<StaticPageRow, DbError> {
        let mut t = self.tables.lock().await;
        let row = t
            .static_pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DbError::NotFound)?;
        row.is_published = data.is_published;
        coalesce(&mut row.published_at, data.published_at.as_ref());
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn upsert_static_page_translation(
        &self,
        static_page_id: i64,
        locale: &str,
        data: &StaticPageTranslationData,
    ) -> Result<(), DbError> {
        let mut t = self.tables.lock().await;
        if let Some(row) = t
            .static_page_translations
            .iter_mut()
            .find(|r| r.static_page_id == static_page_id && r.locale == locale)
        {
            row.title.clone_from(&data.title);
            row.content.clone_from(&data.content);
            coalesce(&mut row.meta_title, data.meta_title.as_ref());
            coalesce(&mut row.meta_description, data.meta_description.as_ref());
            return Ok(());
        }
        let id = t.next_id();
        t.static_page_translations.push(StaticPageTranslationRow {
            id,
            static_page_id,
            locale: locale.to_string(),
            title: data.title.clone(),
            content: data.content.clone(),
            meta_title: data.meta_title.clone(),
            meta_description: data.meta_description.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(slug: &str) -> CategoryData {
        CategoryData {
            slug: slug.to_string(),
            path: format!("/{slug}"),
            parent_id: None,
            icon_url: None,
            image_url: Some("https://cdn.example.com/c.png".to_string()),
            position: 0,
            is_published: true,
            show_in_menu: true,
        }
    }

    #[tokio::test]
    async fn create_category_rejects_duplicate_slug() {
        let store = MemoryStore::new();
        store.create_category(&category("coatings")).await.unwrap();
        let err = store
            .create_category(&category("coatings"))
            .await
            .expect_err("duplicate slug should fail");
        assert!(matches!(
            err,
            DbError::UniqueViolation {
                entity: "categories",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn update_category_keeps_fields_left_unset() {
        let store = MemoryStore::new();
        let created = store.create_category(&category("coatings")).await.unwrap();

        let mut update = category("coatings");
        update.image_url = None;
        update.position = 4;
        let updated = store.update_category(created.id, &update).await.unwrap();

        assert_eq!(updated.position, 4);
        assert_eq!(
            updated.image_url.as_deref(),
            Some("https://cdn.example.com/c.png")
        );
    }

    #[tokio::test]
    async fn update_unknown_category_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_category(42, &category("ghost"))
            .await
            .expect_err("unknown id should fail");
        assert!(matches!(err, DbError::NotFound));
    }

    #[tokio::test]
    async fn translation_upsert_is_partial() {
        let store = MemoryStore::new();
        let created = store.create_category(&category("coatings")).await.unwrap();

        store
            .upsert_category_translation(
                created.id,
                "en",
                &CategoryTranslationData {
                    name: "Coatings".to_string(),
                    description: Some("Protective coatings".to_string()),
                    meta_title: None,
                    meta_description: None,
                },
            )
            .await
            .unwrap();
        store
            .upsert_category_translation(
                created.id,
                "en",
                &CategoryTranslationData {
                    name: "Coatings & Paints".to_string(),
                    description: None,
                    meta_title: Some("Coatings".to_string()),
                    meta_description: None,
                },
            )
            .await
            .unwrap();

        let row = store.category_translation(created.id, "en").await.unwrap();
        assert_eq!(row.name, "Coatings & Paints");
        assert_eq!(row.description.as_deref(), Some("Protective coatings"));
        assert_eq!(row.meta_title.as_deref(), Some("Coatings"));
        assert_eq!(store.counts().await.category_translations, 1);
    }

    #[tokio::test]
    async fn product_slug_is_unique_per_locale_only() {
        let store = MemoryStore::new();
        let data = |sku: &str| ProductData {
            sku: sku.to_string(),
            category_id: None,
            is_published: true,
            is_featured: false,
            position: 0,
        };
        let translation = ProductTranslationData {
            name: "Ceramic Coating".to_string(),
            slug: "ceramic-coating".to_string(),
            short_description: None,
            description: None,
            features: None,
            applications: None,
            meta_title: None,
            meta_description: None,
        };

        let a = store.create_product(&data("A-1")).await.unwrap();
        let b = store.create_product(&data("B-1")).await.unwrap();
        store
            .upsert_product_translation(a.id, "en", &translation)
            .await
            .unwrap();
        store
            .upsert_product_translation(b.id, "de", &translation)
            .await
            .expect("same slug in another locale is allowed");
        let err = store
            .upsert_product_translation(b.id, "en", &translation)
            .await
            .expect_err("same slug in the same locale must fail");
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn link_product_tag_is_idempotent() {
        let store = MemoryStore::new();
        let tag = store.create_tag("high-temperature").await.unwrap();
        assert!(store.link_product_tag(1, tag.id).await.unwrap());
        assert!(!store.link_product_tag(1, tag.id).await.unwrap());
        assert_eq!(store.counts().await.product_tags, 1);
    }

    #[tokio::test]
    async fn ensure_tag_translation_never_overwrites() {
        let store = MemoryStore::new();
        let tag = store.create_tag("high-temperature").await.unwrap();
        assert!(store
            .ensure_tag_translation(tag.id, "en", "High Temperature")
            .await
            .unwrap());
        assert!(!store
            .ensure_tag_translation(tag.id, "en", "high temperature")
            .await
            .unwrap());
        let row = store.tag_translation(tag.id, "en").await.unwrap();
        assert_eq!(row.name, "High Temperature");
    }
}
