//! Shared test helpers for storage module tests.

#[cfg(test)]
use sqlx::Row;

#[cfg(test)]
use crate::config::ConnectionSettings;
#[cfg(test)]
use crate::storage::{connect, Destination};

/// Opens a fresh in-memory SQLite destination.
#[cfg(test)]
pub async fn memory_destination() -> Destination {
    let settings =
        ConnectionSettings::from_url("sqlite::memory:").expect("Failed to parse memory url");
    connect(&settings)
        .await
        .expect("Failed to open in-memory database")
}

/// Column names and declared types of a SQLite table, in column order.
#[cfg(test)]
pub async fn column_types(dest: &mut Destination, table: &str) -> Vec<(String, String)> {
    sqlx::query("SELECT name, type FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(dest.connection())
        .await
        .expect("Failed to read table info")
        .iter()
        .map(|row| (row.get::<String, _>(0), row.get::<String, _>(1)))
        .collect()
}

/// Runs `sql` and returns every column of every row as optional text.
/// Callers cast non-text columns in the query itself.
#[cfg(test)]
pub async fn fetch_text_rows(dest: &mut Destination, sql: &str) -> Vec<Vec<Option<String>>> {
    sqlx::query(sql)
        .fetch_all(dest.connection())
        .await
        .expect("Failed to query rows")
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|idx| row.get::<Option<String>, _>(idx))
                .collect()
        })
        .collect()
}
