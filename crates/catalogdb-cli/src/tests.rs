use super::*;

#[test]
fn no_arguments_uses_defaults() {
    let cli = Cli::try_parse_from(["importer"]).expect("expected valid cli args");

    assert_eq!(cli.data_dir, PathBuf::from("./data"));
    assert_eq!(cli.locale, "en");
    assert_eq!(cli.throttle_ms, 100);
    assert!(!cli.dry_run);
    assert!(!cli.migrate);
    assert!(cli.only.is_empty());
}

#[test]
fn parses_positional_arguments() {
    let cli = Cli::try_parse_from(["importer", "/srv/scrape", "de", "250"])
        .expect("expected valid cli args");

    assert_eq!(cli.data_dir, PathBuf::from("/srv/scrape"));
    assert_eq!(cli.locale, "de");
    assert_eq!(cli.throttle_ms, 250);
}

#[test]
fn non_numeric_throttle_is_rejected() {
    assert!(Cli::try_parse_from(["importer", "./data", "en", "fast"]).is_err());
}

#[test]
fn parses_repeated_only_flags() {
    let cli = Cli::try_parse_from([
        "importer",
        "--only",
        "products",
        "--only",
        "categories",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.only, vec![Stage::Products, Stage::Categories]);
}

#[test]
fn unknown_stage_is_rejected() {
    assert!(Cli::try_parse_from(["importer", "--only", "banners"]).is_err());
}

#[test]
fn migrate_conflicts_with_dry_run() {
    assert!(Cli::try_parse_from(["importer", "--dry-run", "--migrate"]).is_err());
}

#[test]
fn dry_run_with_positionals() {
    let cli = Cli::try_parse_from(["importer", "--dry-run", "./fixtures", "fr"])
        .expect("expected valid cli args");

    assert!(cli.dry_run);
    assert_eq!(cli.locale, "fr");
    assert_eq!(cli.throttle_ms, 100);
}

#[test]
fn import_options_default_to_all_stages() {
    let cli = Cli::try_parse_from(["importer", "./data", "en", "0"]).expect("valid args");
    let options = cli.import_options();

    assert_eq!(options.stages, Stage::ALL.to_vec());
    assert_eq!(options.throttle_ms, 0);
}

#[test]
fn import_options_keep_selected_stages() {
    let cli = Cli::try_parse_from(["importer", "--only", "static-pages"]).expect("valid args");

    assert_eq!(cli.import_options().stages, vec![Stage::StaticPages]);
}

#[tokio::test]
async fn dry_run_imports_fixture_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("categories.json"),
        r#"[{"slug": "coatings", "name": "Coatings"}]"#,
    )
    .unwrap();

    let data_dir = dir.path().display().to_string();
    let cli = Cli::try_parse_from(["importer", "--dry-run", data_dir.as_str(), "en", "0"])
        .expect("valid args");
    let stats = run_dry(cli.import_options()).await.unwrap();

    assert_eq!(stats.created, 1);
    assert!(stats.completed_at.is_some());
}

fn config_for(env: Environment) -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/catalog".to_string(),
        env,
        log_level: "info".to_string(),
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
    }
}

#[test]
fn ansi_logs_only_in_development() {
    assert!(use_ansi(None));
    assert!(use_ansi(Some(&config_for(Environment::Development))));
    assert!(!use_ansi(Some(&config_for(Environment::Test))));
    assert!(!use_ansi(Some(&config_for(Environment::Production))));
}

