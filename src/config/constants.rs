//! Configuration constants.
//!
//! This module defines the defaults and environment variable names used
//! throughout the application.

// Environment variables (read after the optional .env file is loaded)
/// Full connection URL; takes precedence over the individual `DB_*` variables
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
// Unprefixed names, read when the matching `DB_*` variable is unset
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_USER: &str = "USER";
pub const ENV_PASSWORD: &str = "PASSWORD";
/// Input file used when `--csv` is not given
pub const ENV_DEFAULT_CSV_PATH: &str = "DEFAULT_CSV_PATH";

// Connection defaults
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Destination table used when `--table` is not given
pub const DEFAULT_TABLE_NAME: &str = "csv_data";

/// Field delimiter for input files
pub const DEFAULT_DELIMITER: u8 = b',';

/// Tokens mapped to null in addition to empty and whitespace-only cells.
///
/// Matching is exact and case-sensitive against the trimmed cell value.
pub const DEFAULT_NULL_TOKENS: &[&str] = &["NA", "N/A", "null", "None"];

/// Date formats recognized during column type inference, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Format used when sending date values to the database
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";
