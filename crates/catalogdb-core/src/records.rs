//! Scraped catalog records as they arrive on disk.
//!
//! The scraper writes one JSON array per entity kind; field names are
//! camelCase on the wire. Records are already language-tagged and cleaned,
//! so the importer treats them as trusted input apart from key checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A category scraped from the source site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedCategory {
    /// Natural key, stable across re-imports.
    pub slug: String,
    /// Materialized hierarchy path, e.g. `"/coatings/ceramic"`.
    #[serde(default)]
    pub path: String,
    /// Parent reference by slug; resolved to an id at import time.
    #[serde(default)]
    pub parent_slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub show_in_menu: bool,
    #[serde(default)]
    pub locale: Option<String>,
}

/// A product image reference. Only the URL is recorded; files are not fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// A downloadable document attached to a product (datasheet, manual, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedAsset {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub url: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedSpecification {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A product scraped from the source site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProduct {
    /// Natural key, stable across re-imports.
    pub sku: String,
    #[serde(default)]
    pub category_slug: Option<String>,
    pub name: String,
    /// Unique per locale, not globally.
    pub slug: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub applications: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub images: Vec<ScrapedImage>,
    #[serde(default)]
    pub assets: Vec<ScrapedAsset>,
    #[serde(default)]
    pub specifications: Vec<ScrapedSpecification>,
    /// Raw specification table cells, consulted only when
    /// `specifications` is empty.
    #[serde(default)]
    pub specification_rows: Vec<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Comma-delimited keyword string, consulted only when `tags` is empty.
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedBlogPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedStaticPage {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_flags_default_to_true() {
        let json = r#"{"slug": "coatings", "name": "Coatings"}"#;
        let category: ScrapedCategory = serde_json::from_str(json).unwrap();
        assert!(category.is_published);
        assert!(category.show_in_menu);
        assert_eq!(category.position, 0);
        assert_eq!(category.path, "");
        assert!(category.parent_slug.is_none());
    }

    #[test]
    fn category_flags_respect_explicit_false() {
        let json = r#"{"slug": "hidden", "name": "Hidden", "isPublished": false, "showInMenu": false}"#;
        let category: ScrapedCategory = serde_json::from_str(json).unwrap();
        assert!(!category.is_published);
        assert!(!category.show_in_menu);
    }

    #[test]
    fn product_reads_camel_case_nested_collections() {
        let json = r#"{
            "sku": "CC-100",
            "categorySlug": "coatings",
            "name": "Ceramic Coating",
            "slug": "ceramic-coating",
            "images": [{"url": "https://cdn.example.com/a.jpg", "altText": "front"}],
            "assets": [{"type": "datasheet", "url": "https://cdn.example.com/a.pdf", "fileName": "a.pdf"}],
            "specifications": [{"key": "Max temp", "value": "1200", "unit": "C"}],
            "tags": ["High Temperature"]
        }"#;
        let product: ScrapedProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_slug.as_deref(), Some("coatings"));
        assert_eq!(product.images[0].alt_text.as_deref(), Some("front"));
        assert!(product.images[0].is_primary.is_none());
        assert_eq!(product.assets[0].asset_type, "datasheet");
        assert_eq!(product.specifications[0].unit.as_deref(), Some("C"));
        assert!(product.is_published);
        assert!(!product.is_featured);
        assert!(product.specification_rows.is_empty());
    }

    #[test]
    fn blog_post_parses_rfc3339_published_at() {
        let json = r#"{"slug": "launch", "title": "Launch", "publishedAt": "2024-03-01T10:00:00Z"}"#;
        let post: ScrapedBlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(
            post.published_at.map(|t| t.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );
        assert_eq!(post.content, "");
    }

    #[test]
    fn product_without_sku_is_rejected() {
        let json = r#"{"name": "No Key", "slug": "no-key"}"#;
        assert!(serde_json::from_str::<ScrapedProduct>(json).is_err());
    }
}
