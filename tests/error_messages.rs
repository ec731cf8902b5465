//! Tests to ensure error messages are actionable and consistent
//!
//! Every failure names its stage and enough context (file, line, table, row,
//! variable) to locate the problem.

use csv_loader::{run_import, Config, ConnectionSettings, ImportError, Stage};
use std::path::PathBuf;

fn sqlite_config(csv_path: PathBuf) -> Config {
    let connection = ConnectionSettings::from_url("sqlite::memory:").expect("valid url");
    Config::new(csv_path, connection)
}

#[test]
fn test_config_validation_errors_are_descriptive() {
    let mut config = sqlite_config(PathBuf::from("in.csv"));
    config.table_name = String::new();
    let err = config.validate().expect_err("empty table name");
    assert_eq!(err.field, "table");
    assert!(err.message.contains("empty"));

    let mut config = sqlite_config(PathBuf::from("in.csv"));
    config.delimiter = b'"';
    let err = config.validate().expect_err("quote delimiter");
    assert_eq!(err.field, "delimiter");

    let config = sqlite_config(PathBuf::new());
    let err = config.validate().expect_err("empty path");
    assert_eq!(err.field, "csv");
}

#[test]
fn test_unsupported_database_scheme() {
    let err = ConnectionSettings::from_url("mysql://localhost/db").expect_err("mysql");
    assert_eq!(err.field, "DATABASE_URL");
    assert!(
        err.to_string().starts_with("invalid configuration for DATABASE_URL"),
        "{err}"
    );
}

#[tokio::test]
async fn test_config_error_from_run_import_reports_config_stage() {
    let mut config = sqlite_config(PathBuf::from("in.csv"));
    config.table_name = "   ".to_string();
    let err = run_import(config).await.expect_err("invalid config");
    assert!(matches!(err, ImportError::Config(_)));
    assert_eq!(err.stage(), Stage::Config);
    assert_eq!(err.stage().to_string(), "config");
}

#[tokio::test]
async fn test_file_access_message_names_the_path() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nowhere.csv");
    let err = run_import(sqlite_config(path.clone()))
        .await
        .expect_err("missing file");
    let message = err.to_string();
    assert!(message.contains("cannot read input file"), "{message}");
    assert!(message.contains("nowhere.csv"), "{message}");
}

#[tokio::test]
async fn test_parse_message_names_the_line() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ragged.csv");
    std::fs::write(&path, "a,b\n1,2\n3,4\n5,6,7\n").expect("Failed to write CSV");
    let err = run_import(sqlite_config(path))
        .await
        .expect_err("ragged row");
    let message = err.to_string();
    assert!(message.contains("(line 4)"), "{message}");
    assert!(message.contains("expected 2 fields, found 3"), "{message}");
    assert_eq!(err.stage(), Stage::Load);
}

#[tokio::test]
async fn test_schema_message_names_the_table() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rows.csv");
    std::fs::write(&path, "x\n1\n").expect("Failed to write CSV");

    // a view is not a table, so creation is attempted and collides with it
    let db_path = dir.path().join("view.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = sqlx::SqlitePool::connect(&url).await.expect("open db");
    sqlx::query("CREATE VIEW taken AS SELECT 1 AS x")
        .execute(&pool)
        .await
        .expect("create view");
    pool.close().await;

    let mut config = Config::new(path, ConnectionSettings::from_url(&url).expect("valid url"));
    config.table_name = "taken".to_string();
    let err = run_import(config).await.expect_err("name is used by a view");

    assert_eq!(err.stage(), Stage::Schema);
    assert!(
        err.to_string().starts_with("cannot prepare table \"taken\""),
        "{err}"
    );
}

#[test]
fn test_write_message_names_table_and_row() {
    let err = ImportError::Write {
        table: "people".to_string(),
        row: 2,
        source: sqlx::Error::RowNotFound,
    };
    assert_eq!(err.stage(), Stage::Write);
    assert!(
        err.to_string()
            .starts_with("insert into \"people\" failed at data row 2: "),
        "{err}"
    );
}
