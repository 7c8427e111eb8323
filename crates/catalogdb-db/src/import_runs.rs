//! Database operations for `import_runs`.
//!
//! A run row is created in `running` status when the importer starts and is
//! moved to `succeeded` (with the final counters) or `failed` (with a
//! message) when it ends. Both transitions require the row to still be
//! `running`.

use catalogdb_core::ImportStats;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `import_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImportRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub data_dir: String,
    pub locale: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_processed: i32,
    pub created_count: i32,
    pub updated_count: i32,
    pub skipped_count: i32,
    pub error_count: i32,
    /// JSON array of `{item, error}` objects.
    pub error_log: serde_json::Value,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

const IMPORT_RUN_COLUMNS: &str = "id, public_id, data_dir, locale, status, started_at, \
                                  completed_at, total_processed, created_count, updated_count, \
                                  skipped_count, error_count, error_log, error_message, created_at";

/// Creates a new import run in `running` status.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_import_run(
    pool: &PgPool,
    data_dir: &str,
    locale: &str,
) -> Result<ImportRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, ImportRunRow>(&format!(
        "INSERT INTO import_runs (public_id, data_dir, locale, status) \
         VALUES ($1, $2, $3, 'running') \
         RETURNING {IMPORT_RUN_COLUMNS}"
    ))
    .bind(public_id)
    .bind(data_dir)
    .bind(locale)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `succeeded` and stores the final counters and error log.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_import_run(
    pool: &PgPool,
    id: i64,
    stats: &ImportStats,
) -> Result<(), DbError> {
    let error_log = serde_json::to_value(&stats.error_log).unwrap_or_default();

    let result = sqlx::query(
        "UPDATE import_runs SET \
             status          = 'succeeded', \
             completed_at    = COALESCE($2, NOW()), \
             total_processed = $3, \
             created_count   = $4, \
             updated_count   = $5, \
             skipped_count   = $6, \
             error_count     = $7, \
             error_log       = $8::jsonb \
         WHERE id = $1 AND status = 'running'",
    )
    .bind(id)
    .bind(stats.completed_at)
    .bind(to_i32(stats.total_processed))
    .bind(to_i32(stats.created))
    .bind(to_i32(stats.updated))
    .bind(to_i32(stats.skipped))
    .bind(to_i32(stats.errors))
    .bind(error_log)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_import_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Fetches a single run by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_import_run(pool: &PgPool, id: i64) -> Result<ImportRunRow, DbError> {
    sqlx::query_as::<_, ImportRunRow>(&format!(
        "SELECT {IMPORT_RUN_COLUMNS} FROM import_runs WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

fn to_i32(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
