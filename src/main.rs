//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `csv_loader` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use csv_loader::initialization::init_logger;
use csv_loader::{run_import, ImportError, Opt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Variables already present in the environment win over .env entries.
    // Try the current directory first, then the executable's directory.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = match Opt::parse().resolve(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => fail(ImportError::from(e)),
    };

    init_logger(config.log_level.clone(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_import(config).await {
        Ok(report) => {
            println!(
                "Inserted {} rows into table '{}'.",
                report.rows_inserted, report.table_name
            );
            Ok(())
        }
        Err(e) => fail(e),
    }
}

/// Reports the failed stage and its cause on stderr, then exits with code 1.
fn fail(error: ImportError) -> ! {
    // ImportError messages already embed their source, so no chain is printed
    eprintln!(
        "csv_loader error: import failed during {} stage: {}",
        error.stage(),
        error
    );
    process::exit(1);
}
