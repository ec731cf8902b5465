// Shared test helpers for temporary input files and SQLite destinations.
//
// Each test gets its own TempDir holding both the CSV and the database file.

use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};

use csv_loader::{Config, ConnectionSettings};

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write CSV file");
    path
}

/// URL of a file-backed SQLite database in `dir`, created on first connect.
pub fn sqlite_url(db_path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", db_path.display())
}

/// Builds an import configuration for `csv_path` into `table` of `db_path`.
pub fn import_config(csv_path: &Path, db_path: &Path, table: &str) -> Config {
    let connection =
        ConnectionSettings::from_url(&sqlite_url(db_path)).expect("Failed to parse sqlite url");
    let mut config = Config::new(csv_path.to_path_buf(), connection);
    config.table_name = table.to_string();
    config
}

/// Opens a pool on an existing database file for inspecting results.
pub async fn open_pool(db_path: &Path) -> SqlitePool {
    SqlitePool::connect(&sqlite_url(db_path))
        .await
        .expect("Failed to open test database")
}

/// Column names and declared types of `table`, in column order.
#[allow(dead_code)] // Used by other test files
pub async fn column_types(pool: &SqlitePool, table: &str) -> Vec<(String, String)> {
    sqlx::query("SELECT name, type FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await
        .expect("Failed to read table info")
        .iter()
        .map(|row| (row.get::<String, _>("name"), row.get::<String, _>("type")))
        .collect()
}

/// Number of rows currently in `table`.
#[allow(dead_code)] // Used by other test files
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{table}\""))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
