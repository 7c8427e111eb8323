//! Loads the scraper's per-kind JSON arrays from the data directory.
//!
//! A file is read as an array of untyped values; each element is decoded
//! into its record type separately, so one element of the wrong shape
//! fails alone instead of taking the whole file with it.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ImportError, ReadError};

pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRODUCTS_FILE: &str = "products.json";
pub const BLOG_POSTS_FILE: &str = "blog-posts.json";
pub const STATIC_PAGES_FILE: &str = "static-pages.json";

/// Reads `data_dir/file_name` as a JSON array.
///
/// A missing file is not an error: it yields an empty list and a warning,
/// so a partial scrape can still be imported.
///
/// # Errors
///
/// Returns [`ReadError::Io`] if the file exists but cannot be read, or
/// [`ReadError::Parse`] if its contents are not a JSON array.
pub async fn read_entities(data_dir: &Path, file_name: &str) -> Result<Vec<Value>, ReadError> {
    let path = data_dir.join(file_name);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "data file not found; skipping");
            return Ok(Vec::new());
        }
        Err(source) => return Err(ReadError::Io { path, source }),
    };

    serde_json::from_slice(&bytes).map_err(|source| ReadError::Parse { path, source })
}

/// Decodes one array element into its record type.
///
/// # Errors
///
/// Returns [`ImportError::InvalidRecord`] when the element is missing a
/// required field or a field has the wrong JSON type.
pub fn decode_record<T: DeserializeOwned>(value: Value) -> Result<T, ImportError> {
    serde_json::from_value(value).map_err(ImportError::InvalidRecord)
}

/// Item id for the run report, taken from the raw element so records that
/// fail to decode are still identifiable. Falls back to the array index.
#[must_use]
pub fn record_item_id(kind: &str, key_field: &str, value: &Value, index: usize) -> String {
    match value
        .get(key_field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|key| !key.is_empty())
    {
        Some(key) => format!("{kind}/{key}"),
        None => format!("{kind}/#{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_core::ScrapedCategory;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let records = read_entities(dir.path(), CATEGORIES_FILE).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CATEGORIES_FILE),
            r#"[{"slug": "coatings", "name": "Coatings"}, {"slug": "paints", "name": "Paints"}]"#,
        )
        .unwrap();

        let records = read_entities(dir.path(), CATEGORIES_FILE).await.unwrap();
        assert_eq!(records.len(), 2);
        let second: ScrapedCategory = decode_record(records[1].clone()).unwrap();
        assert_eq!(second.slug, "paints");
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), "[{\"slug\": ").unwrap();

        let err = read_entities(dir.path(), CATEGORIES_FILE)
            .await
            .expect_err("truncated JSON should fail");
        assert!(matches!(err, ReadError::Parse { .. }));
        assert!(err.to_string().contains(CATEGORIES_FILE));
    }

    #[tokio::test]
    async fn object_instead_of_array_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CATEGORIES_FILE),
            r#"{"slug": "coatings", "name": "Coatings"}"#,
        )
        .unwrap();

        let err = read_entities(dir.path(), CATEGORIES_FILE)
            .await
            .expect_err("non-array should fail");
        assert!(matches!(err, ReadError::Parse { .. }));
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(CATEGORIES_FILE)).unwrap();

        let err = read_entities(dir.path(), CATEGORIES_FILE)
            .await
            .expect_err("reading a directory should fail");
        assert!(matches!(err, ReadError::Io { .. }));
    }

    #[test]
    fn element_of_the_wrong_shape_fails_on_its_own() {
        let err = decode_record::<ScrapedCategory>(json!({"slug": "coatings", "position": "3"}))
            .expect_err("string position should not decode");
        assert!(matches!(err, ImportError::InvalidRecord(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn item_id_uses_raw_key_or_index() {
        let keyed = json!({"sku": " CC-100 ", "name": 7});
        assert_eq!(record_item_id("product", "sku", &keyed, 0), "product/CC-100");
        assert_eq!(record_item_id("product", "sku", &json!({"sku": ""}), 4), "product/#4");
        assert_eq!(record_item_id("page", "slug", &json!(42), 2), "page/#2");
    }
}
