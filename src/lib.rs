//! csv_loader library: load a CSV file, clean it, and append it to a database
//! table.
//!
//! # Example
//!
//! ```no_run
//! use csv_loader::{run_import, Config, ConnectionSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = ConnectionSettings::from_url("sqlite://./people.db?mode=rwc")?;
//! let mut config = Config::new("people.csv".into(), connection);
//! config.table_name = "people".to_string();
//!
//! let report = run_import(config).await?;
//! println!("Inserted {} rows into table '{}'.", report.rows_inserted, report.table_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Database access is async; call [`run_import`] from within a Tokio runtime.

pub mod clean;
pub mod config;
mod error_handling;
pub mod ingest;
pub mod initialization;
pub mod storage;
pub mod table;

// Re-export public API
pub use clean::{clean_table, CleanStats, NullTokens};
pub use config::{Config, ConnectionSettings, LogFormat, LogLevel, Opt};
pub use error_handling::{ConfigError, ImportError, InitializationError, Stage};
pub use ingest::{load_csv, LoadOptions};
pub use run::{run_import, ImportReport};
pub use storage::{ensure_table_exists, insert_rows, TableStatus};
pub use table::{ColumnDef, ColumnType, Row, Table, Value};

// Internal run module (drives the stages of one import)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use log::info;

    use crate::clean::{clean_table, NullTokens};
    use crate::config::Config;
    use crate::error_handling::ImportError;
    use crate::ingest::{load_csv, LoadOptions};
    use crate::storage::{connect, ensure_table_exists, insert_rows, Destination, TableStatus};
    use crate::table::Table;

    /// Results of a completed import.
    #[derive(Debug, Clone)]
    pub struct ImportReport {
        /// Input file that was loaded
        pub csv_path: PathBuf,
        /// Destination table
        pub table_name: String,
        /// Data rows read from the file
        pub rows_read: usize,
        /// Rows left after cleaning
        pub rows_after_cleaning: usize,
        /// Exact-duplicate rows dropped by the cleaner
        pub duplicates_removed: usize,
        /// Cells replaced by null during cleaning
        pub nulls_normalized: usize,
        /// Whether this run created the destination table
        pub table_created: bool,
        /// Rows written to the destination table
        pub rows_inserted: u64,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs one import: load, clean, ensure the table, insert.
    ///
    /// The file is loaded and cleaned before the database is contacted, so an
    /// unreadable or malformed file never opens a connection. Once opened, the
    /// connection is closed whether or not the remaining stages succeed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImportError`] raised by any stage; its
    /// [`ImportError::stage`] names where the run stopped. Rows inserted before
    /// a `Write` error are not rolled back.
    pub async fn run_import(config: Config) -> Result<ImportReport, ImportError> {
        let start_time = Instant::now();
        config.validate()?;

        let options = LoadOptions {
            delimiter: config.delimiter,
            null_tokens: NullTokens::new(&config.null_tokens),
        };
        let table = load_csv(&config.csv_path, &options)?;
        let (table, stats) = clean_table(table, &options.null_tokens);

        let mut dest = connect(&config.connection).await?;
        let outcome = write_table(&mut dest, &config.table_name, &table).await;
        dest.close().await;
        let (status, rows_inserted) = outcome?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!(
            "Import of {} into '{}' finished in {:.2}s",
            config.csv_path.display(),
            config.table_name,
            elapsed_seconds
        );

        Ok(ImportReport {
            csv_path: config.csv_path,
            table_name: config.table_name,
            rows_read: stats.rows_before,
            rows_after_cleaning: stats.rows_after,
            duplicates_removed: stats.duplicates_removed,
            nulls_normalized: stats.nulls_normalized,
            table_created: status.was_created(),
            rows_inserted,
            elapsed_seconds,
        })
    }

    async fn write_table(
        dest: &mut Destination,
        table_name: &str,
        table: &Table,
    ) -> Result<(TableStatus, u64), ImportError> {
        let status = ensure_table_exists(dest, table_name, table.columns()).await?;
        let inserted = insert_rows(dest, table_name, table).await?;
        Ok((status, inserted))
    }
}
