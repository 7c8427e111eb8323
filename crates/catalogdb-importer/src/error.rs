use std::path::PathBuf;

use catalogdb_db::DbError;
use thiserror::Error;

/// Failure loading one stage's data file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure upserting a single record.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The record's natural key (`slug` or `sku`) is empty, so it cannot be
    /// matched against stored rows.
    #[error("{kind} record has an empty {field}")]
    MissingKey {
        kind: &'static str,
        field: &'static str,
    },

    /// The array element is valid JSON but does not match the record type.
    #[error("record does not match the expected shape: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ImportError {
    /// Fatal errors end the run; anything else only fails the record.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ImportError::Db(e) if e.is_connection_failure())
    }
}
