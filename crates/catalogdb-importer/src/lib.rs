//! Imports scraped catalog JSON into a [`catalogdb_db::CatalogStore`].

pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod reader;
pub mod upsert;

pub use error::{ImportError, ReadError};
pub use normalize::{
    clean_text, extract_tags_from_text, generate_slug, parse_specifications, truncate_text,
    DEFAULT_TRUNCATE_LEN,
};
pub use orchestrator::{ImportAborted, ImportOptions, Importer, Stage, UnknownStage};
pub use reader::{decode_record, read_entities, record_item_id};
pub use upsert::{
    upsert_blog_post, upsert_category, upsert_product, upsert_static_page, UpsertOutcome,
};
