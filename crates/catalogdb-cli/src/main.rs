use std::path::PathBuf;

use anyhow::Context;
use catalogdb_core::{AppConfig, Environment, ImportStats};
use catalogdb_db::{MemoryStore, PgCatalogStore, PoolConfig};
use catalogdb_importer::orchestrator::{DEFAULT_DATA_DIR, DEFAULT_LOCALE, DEFAULT_THROTTLE_MS};
use catalogdb_importer::{ImportOptions, Importer, Stage};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "importer")]
#[command(about = "Import scraped catalog JSON into the catalog database")]
struct Cli {
    /// Directory containing categories.json, products.json, blog-posts.json
    /// and static-pages.json
    #[arg(default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Locale for records that do not carry their own
    #[arg(default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Pause after each stage, in milliseconds
    #[arg(default_value_t = DEFAULT_THROTTLE_MS)]
    throttle_ms: u64,

    /// Import into an in-memory store instead of the database
    #[arg(long)]
    dry_run: bool,

    /// Apply pending migrations before importing
    #[arg(long, conflicts_with = "dry_run")]
    migrate: bool,

    /// Run only this stage; repeat to select several
    #[arg(long = "only", value_name = "STAGE")]
    only: Vec<Stage>,
}

impl Cli {
    fn import_options(&self) -> ImportOptions {
        ImportOptions {
            data_dir: self.data_dir.clone(),
            locale: self.locale.clone(),
            throttle_ms: self.throttle_ms,
            stages: if self.only.is_empty() {
                Stage::ALL.to_vec()
            } else {
                self.only.clone()
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // DATABASE_URL is checked before any stage runs.
    let config = if cli.dry_run {
        None
    } else {
        Some(catalogdb_core::load_app_config()?)
    };
    init_tracing(config.as_ref())?;

    let options = cli.import_options();
    let stats = match &config {
        Some(config) => run_with_database(config, options, cli.migrate).await?,
        None => run_dry(options).await?,
    };

    println!("{}", stats.summary());
    Ok(())
}

fn init_tracing(config: Option<&AppConfig>) -> anyhow::Result<()> {
    let level = config.map_or_else(
        || std::env::var("CATALOG_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        |c| c.log_level.clone(),
    );
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(use_ansi(config))
        .with_writer(std::io::stderr)
        .init();
    if let Some(config) = config {
        tracing::debug!(env = %config.env, "configuration loaded");
    }
    Ok(())
}

/// Colored log output only in development; dry runs count as development.
fn use_ansi(config: Option<&AppConfig>) -> bool {
    config.is_none_or(|c| c.env == Environment::Development)
}

async fn run_dry(options: ImportOptions) -> anyhow::Result<ImportStats> {
    tracing::info!("dry run: importing into an in-memory store");
    let store = MemoryStore::new();
    let stats = Importer::new(&store, options).import_all().await?;

    let counts = store.counts().await;
    tracing::info!(
        categories = counts.categories,
        products = counts.products,
        tags = counts.tags,
        blog_posts = counts.blog_posts,
        static_pages = counts.static_pages,
        "dry run complete; nothing was written to the database"
    );
    Ok(stats)
}

/// Opens the pool for the duration of the run and closes it whatever the
/// outcome.
async fn run_with_database(
    config: &AppConfig,
    options: ImportOptions,
    migrate: bool,
) -> anyhow::Result<ImportStats> {
    let pool =
        catalogdb_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
            .await
            .context("failed to connect to database")?;

    let result = import_with_pool(&pool, options, migrate).await;
    pool.close().await;
    result
}

async fn import_with_pool(
    pool: &sqlx::PgPool,
    options: ImportOptions,
    migrate: bool,
) -> anyhow::Result<ImportStats> {
    catalogdb_db::health_check(pool)
        .await
        .context("database health check failed")?;

    if migrate {
        let applied = catalogdb_db::run_migrations(pool).await?;
        tracing::info!(applied, "migrations applied");
    }

    let data_dir = options.data_dir.display().to_string();
    let run = catalogdb_db::create_import_run(pool, &data_dir, &options.locale).await?;
    tracing::info!(run_id = run.id, public_id = %run.public_id, "import run started");

    let store = PgCatalogStore::new(pool.clone());
    match Importer::new(&store, options).import_all().await {
        Ok(stats) => {
            if let Err(e) = catalogdb_db::complete_import_run(pool, run.id, &stats).await {
                tracing::error!(run_id = run.id, error = %e, "failed to record import run result");
            }
            Ok(stats)
        }
        Err(aborted) => {
            println!("{}", aborted.stats.summary());
            fail_run_best_effort(pool, run.id, &aborted.to_string()).await;
            Err(aborted.into())
        }
    }
}

async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: &str) {
    if let Err(mark_err) = catalogdb_db::fail_import_run(pool, run_id, message).await {
        tracing::error!(
            run_id,
            error = %mark_err,
            "failed to mark import run as failed"
        );
    }
}

#[cfg(test)]
mod tests;
