//! Offline tests for catalogdb-db pool configuration and row types.
//! These tests do not require a live database connection.

use catalogdb_core::{AppConfig, Environment};
use catalogdb_db::{ImportRunRow, PoolConfig, ProductRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ImportRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn import_run_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ImportRunRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        data_dir: "./data".to_string(),
        locale: "en".to_string(),
        status: "running".to_string(),
        started_at: Utc::now(),
        completed_at: None,
        total_processed: 0_i32,
        created_count: 0,
        updated_count: 0,
        skipped_count: 0,
        error_count: 0,
        error_log: serde_json::json!([]),
        error_message: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.status, "running");
    assert!(row.completed_at.is_none());
    assert_eq!(row.error_log, serde_json::json!([]));
}

#[test]
fn product_row_has_expected_fields() {
    use chrono::Utc;

    let row = ProductRow {
        id: 42_i64,
        sku: "CC-100".to_string(),
        category_id: Some(7),
        is_published: true,
        is_featured: false,
        position: 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.sku, "CC-100");
    assert_eq!(row.category_id, Some(7));
    assert_eq!(row.position, 3);
}
