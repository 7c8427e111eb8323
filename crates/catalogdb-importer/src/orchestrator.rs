//! Runs the per-kind upserters over the data directory in dependency order.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use catalogdb_core::{
    ImportStats, ScrapedBlogPost, ScrapedCategory, ScrapedProduct, ScrapedStaticPage,
};
use catalogdb_db::CatalogStore;
use serde_json::Value;

use crate::error::ImportError;
use crate::reader::{
    decode_record, read_entities, record_item_id, BLOG_POSTS_FILE, CATEGORIES_FILE,
    PRODUCTS_FILE, STATIC_PAGES_FILE,
};
use crate::upsert::{
    upsert_blog_post, upsert_category, upsert_product, upsert_static_page, UpsertOutcome,
};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// One phase of an import run, dedicated to a single entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Categories,
    Products,
    BlogPosts,
    StaticPages,
}

impl Stage {
    /// Every stage in run order. Categories precede products so category
    /// references resolve, and parents precede children within the file.
    pub const ALL: [Stage; 4] = [
        Stage::Categories,
        Stage::Products,
        Stage::BlogPosts,
        Stage::StaticPages,
    ];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Stage::Categories => CATEGORIES_FILE,
            Stage::Products => PRODUCTS_FILE,
            Stage::BlogPosts => BLOG_POSTS_FILE,
            Stage::StaticPages => STATIC_PAGES_FILE,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Categories => "categories",
            Stage::Products => "products",
            Stage::BlogPosts => "blog-posts",
            Stage::StaticPages => "static-pages",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage '{0}' (expected categories, products, blog-posts, or static-pages)")]
pub struct UnknownStage(String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub data_dir: PathBuf,
    /// Locale for records that do not carry their own.
    pub locale: String,
    /// Pause after each stage, in milliseconds. Zero disables it.
    pub throttle_ms: u64,
    /// Stages to run. Order here is irrelevant; [`Stage::ALL`] order is
    /// always used.
    pub stages: Vec<Stage>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            locale: DEFAULT_LOCALE.to_string(),
            throttle_ms: DEFAULT_THROTTLE_MS,
            stages: Stage::ALL.to_vec(),
        }
    }
}

/// A run stopped early because the store became unreachable.
#[derive(Debug, thiserror::Error)]
#[error("import aborted at {item}: {source}")]
pub struct ImportAborted {
    pub item: String,
    #[source]
    pub source: ImportError,
    /// Report up to and including the failed record.
    pub stats: Box<ImportStats>,
}

/// Drives one import run against an injected store.
pub struct Importer<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    options: ImportOptions,
}

impl<'a, S: CatalogStore + ?Sized> Importer<'a, S> {
    pub fn new(store: &'a S, options: ImportOptions) -> Self {
        Self { store, options }
    }

    #[must_use]
    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Runs every selected stage and returns the finished run report.
    ///
    /// Record failures, including elements that do not decode into their
    /// record type, are counted and logged, never propagated. A stage whose
    /// file cannot be read or is not a JSON array contributes no records.
    ///
    /// # Errors
    ///
    /// Returns [`ImportAborted`] when the store becomes unreachable; the
    /// report collected up to that point travels with the error.
    pub async fn import_all(&self) -> Result<ImportStats, ImportAborted> {
        let mut stats = ImportStats::new();
        let throttle = Duration::from_millis(self.options.throttle_ms);

        tracing::info!(
            data_dir = %self.options.data_dir.display(),
            locale = %self.options.locale,
            throttle_ms = self.options.throttle_ms,
            "starting catalog import"
        );

        for stage in Stage::ALL {
            if !self.options.stages.contains(&stage) {
                tracing::debug!(%stage, "stage not selected; skipping");
                continue;
            }
            let outcome = match stage {
                Stage::Categories => self.import_categories(&mut stats).await,
                Stage::Products => self.import_products(&mut stats).await,
                Stage::BlogPosts => self.import_blog_posts(&mut stats).await,
                Stage::StaticPages => self.import_static_pages(&mut stats).await,
            };
            if let Err((item, source)) = outcome {
                tracing::error!(%stage, item = %item, error = %source, "store unreachable; aborting import");
                stats.record_error(item.clone(), source.to_string());
                stats.finish();
                return Err(ImportAborted {
                    item,
                    source,
                    stats: Box::new(stats),
                });
            }
            if !throttle.is_zero() {
                tokio::time::sleep(throttle).await;
            }
        }

        stats.finish();
        tracing::info!(
            processed = stats.total_processed,
            created = stats.created,
            updated = stats.updated,
            skipped = stats.skipped,
            errors = stats.errors,
            duration_ms = stats.duration().num_milliseconds(),
            "catalog import finished"
        );
        Ok(stats)
    }

    async fn import_categories(&self, stats: &mut ImportStats) -> Result<(), Fatal> {
        for (index, value) in self.load(Stage::Categories).await.into_iter().enumerate() {
            let item = record_item_id("category", "slug", &value, index);
            let result = match decode_record::<ScrapedCategory>(value) {
                Ok(record) => upsert_category(self.store, &record, &self.options.locale).await,
                Err(e) => Err(e),
            };
            tally(stats, item, result)?;
        }
        Ok(())
    }

    async fn import_products(&self, stats: &mut ImportStats) -> Result<(), Fatal> {
        for (index, value) in self.load(Stage::Products).await.into_iter().enumerate() {
            let item = record_item_id("product", "sku", &value, index);
            let result = match decode_record::<ScrapedProduct>(value) {
                Ok(record) => upsert_product(self.store, &record, &self.options.locale).await,
                Err(e) => Err(e),
            };
            tally(stats, item, result)?;
        }
        Ok(())
    }

    async fn import_blog_posts(&self, stats: &mut ImportStats) -> Result<(), Fatal> {
        for (index, value) in self.load(Stage::BlogPosts).await.into_iter().enumerate() {
            let item = record_item_id("post", "slug", &value, index);
            let result = match decode_record::<ScrapedBlogPost>(value) {
                Ok(record) => upsert_blog_post(self.store, &record, &self.options.locale).await,
                Err(e) => Err(e),
            };
            tally(stats, item, result)?;
        }
        Ok(())
    }

    async fn import_static_pages(&self, stats: &mut ImportStats) -> Result<(), Fatal> {
        for (index, value) in self.load(Stage::StaticPages).await.into_iter().enumerate() {
            let item = record_item_id("page", "slug", &value, index);
            let result = match decode_record::<ScrapedStaticPage>(value) {
                Ok(record) => upsert_static_page(self.store, &record, &self.options.locale).await,
                Err(e) => Err(e),
            };
            tally(stats, item, result)?;
        }
        Ok(())
    }

    async fn load(&self, stage: Stage) -> Vec<Value> {
        match read_entities(&self.options.data_dir, stage.file_name()).await {
            Ok(records) => {
                tracing::info!(%stage, count = records.len(), "importing stage");
                records
            }
            Err(e) => {
                tracing::warn!(%stage, error = %e, "could not load stage data; skipping stage");
                Vec::new()
            }
        }
    }
}

/// Item id and error of the record that ended the run.
type Fatal = (String, ImportError);

/// Counts one record attempt. Fatal errors are handed back uncounted so the
/// caller can stop the run.
fn tally(
    stats: &mut ImportStats,
    item: String,
    result: Result<UpsertOutcome, ImportError>,
) -> Result<(), Fatal> {
    match result {
        Ok(UpsertOutcome::Created) => stats.record_created(),
        Ok(UpsertOutcome::Updated) => stats.record_updated(),
        Err(e @ ImportError::MissingKey { .. }) => {
            tracing::warn!(item = %item, error = %e, "skipping record");
            stats.record_skipped();
        }
        Err(e) if e.is_fatal() => return Err((item, e)),
        Err(e) => {
            tracing::warn!(item = %item, error = %e, "failed to import record");
            stats.record_error(item, e.to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogdb_db::DbError;

    #[test]
    fn stages_parse_case_insensitively() {
        assert_eq!("products".parse::<Stage>().unwrap(), Stage::Products);
        assert_eq!("Blog-Posts".parse::<Stage>().unwrap(), Stage::BlogPosts);
        assert!("pages".parse::<Stage>().is_err());
    }

    #[test]
    fn stage_names_round_trip_through_display() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn stage_files_match_scraper_output() {
        assert_eq!(Stage::Categories.file_name(), "categories.json");
        assert_eq!(Stage::StaticPages.file_name(), "static-pages.json");
    }

    #[test]
    fn default_options_run_everything() {
        let options = ImportOptions::default();
        assert_eq!(options.data_dir, PathBuf::from("./data"));
        assert_eq!(options.locale, "en");
        assert_eq!(options.throttle_ms, 100);
        assert_eq!(options.stages, Stage::ALL.to_vec());
    }

    #[test]
    fn missing_key_counts_as_skipped() {
        let mut stats = ImportStats::new();
        let result = tally(
            &mut stats,
            "product/".to_string(),
            Err(ImportError::MissingKey {
                kind: "product",
                field: "sku",
            }),
        );
        assert!(result.is_ok());
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.total_processed, 1);
    }

    #[test]
    fn record_errors_are_logged_and_counted() {
        let mut stats = ImportStats::new();
        let result = tally(
            &mut stats,
            "category/coatings".to_string(),
            Err(ImportError::Db(DbError::UniqueViolation {
                entity: "categories",
                key: "categories_slug_key".to_string(),
            })),
        );
        assert!(result.is_ok());
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.error_log[0].item, "category/coatings");
    }

    #[test]
    fn connection_failures_stop_the_run() {
        let mut stats = ImportStats::new();
        let result = tally(
            &mut stats,
            "product/CC-100".to_string(),
            Err(ImportError::Db(DbError::Sqlx(sqlx::Error::PoolClosed))),
        );
        let (item, err) = result.expect_err("pool closed should be fatal");
        assert_eq!(item, "product/CC-100");
        assert!(err.is_fatal());
        assert_eq!(stats.total_processed, 0);
    }
}
