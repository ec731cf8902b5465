//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::connection::ConnectionSettings;
use crate::config::constants::{
    DEFAULT_DELIMITER, DEFAULT_NULL_TOKENS, DEFAULT_TABLE_NAME, ENV_DEFAULT_CSV_PATH,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Both the input file and the destination table are optional: the file falls
/// back to `DEFAULT_CSV_PATH` and the table to `csv_data`.
///
/// # Examples
///
/// ```bash
/// # Use DEFAULT_CSV_PATH and the default table
/// csv_loader
///
/// # Explicit file and table
/// csv_loader --csv ./data/customers.csv --table customers
///
/// # Only treat "-" and empty cells as missing
/// csv_loader --csv data.csv --null-token -
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "csv_loader",
    about = "Cleans a CSV file and loads it into a database table."
)]
pub struct Opt {
    /// Path to the CSV file (default: $DEFAULT_CSV_PATH)
    #[arg(long = "csv", value_parser)]
    pub csv_path: Option<PathBuf>,

    /// Destination table name
    #[arg(long = "table", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Token treated as a missing value (repeatable).
    ///
    /// Replaces the default set (NA, N/A, null, None). Empty and
    /// whitespace-only cells are always treated as missing.
    #[arg(long = "null-token")]
    pub null_tokens: Vec<String>,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

impl Opt {
    /// Resolves CLI options into a library [`Config`].
    ///
    /// `lookup` supplies environment variables; the binary passes
    /// `std::env::var`, tests pass a map.
    pub fn resolve<F>(self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let csv_path = match self.csv_path {
            Some(path) => path,
            None => lookup(ENV_DEFAULT_CSV_PATH)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| {
                    ConfigError::new(
                        "csv",
                        format!("no input file given; pass --csv or set {ENV_DEFAULT_CSV_PATH}"),
                    )
                })?,
        };

        if !self.delimiter.is_ascii() {
            return Err(ConfigError::new(
                "delimiter",
                format!("'{}' is not a single ASCII character", self.delimiter),
            ));
        }

        let connection = ConnectionSettings::from_lookup(&lookup)?;

        let mut config = Config::new(csv_path, connection);
        config.table_name = self.table_name;
        config.log_level = self.log_level;
        config.log_format = self.log_format;
        config.delimiter = self.delimiter as u8;
        if !self.null_tokens.is_empty() {
            config.null_tokens = self.null_tokens;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use csv_loader::{Config, ConnectionSettings};
///
/// let connection = ConnectionSettings::from_url("sqlite://./local.db?mode=rwc").unwrap();
/// let mut config = Config::new("data/input.csv".into(), connection);
/// config.table_name = "customers".to_string();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// CSV file to load
    pub csv_path: PathBuf,

    /// Destination table name
    pub table_name: String,

    /// Database connection target
    pub connection: ConnectionSettings,

    /// Tokens normalized to null besides empty/whitespace-only cells
    pub null_tokens: Vec<String>,

    /// Field delimiter
    pub delimiter: u8,

    /// Logger level the binary initializes with
    pub log_level: LogLevel,

    /// Logger output format the binary initializes with
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a configuration with default table name, tokens and delimiter.
    pub fn new(csv_path: PathBuf, connection: ConnectionSettings) -> Self {
        Self {
            csv_path,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            connection,
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|t| t.to_string()).collect(),
            delimiter: DEFAULT_DELIMITER,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }

    /// Checks values that clap cannot validate on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::new("table", "table name must not be empty"));
        }
        if self.table_name.contains('\0') {
            return Err(ConfigError::new("table", "table name must not contain NUL"));
        }
        if self.csv_path.as_os_str().is_empty() {
            return Err(ConfigError::new("csv", "input file path must not be empty"));
        }
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ConfigError::new(
                "delimiter",
                "delimiter must not be a quote or line break",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn sqlite_env(extra: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut pairs = vec![("DATABASE_URL", "sqlite://./test.db")];
        pairs.extend_from_slice(extra);
        env(&pairs)
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_cli_defaults() {
        let opt = Opt::try_parse_from(["csv_loader"]).expect("defaults should parse");
        assert!(opt.csv_path.is_none());
        assert_eq!(opt.table_name, "csv_data");
        assert!(opt.null_tokens.is_empty());
        assert_eq!(opt.delimiter, ',');
    }

    #[test]
    fn test_resolve_uses_cli_path_over_env() {
        let opt = Opt::try_parse_from(["csv_loader", "--csv", "cli.csv", "--table", "people"])
            .expect("should parse");
        let config = opt
            .resolve(sqlite_env(&[("DEFAULT_CSV_PATH", "env.csv")]))
            .expect("should resolve");
        assert_eq!(config.csv_path, PathBuf::from("cli.csv"));
        assert_eq!(config.table_name, "people");
    }

    #[test]
    fn test_resolve_falls_back_to_env_path() {
        let opt = Opt::try_parse_from(["csv_loader"]).expect("should parse");
        let config = opt
            .resolve(sqlite_env(&[("DEFAULT_CSV_PATH", "env.csv")]))
            .expect("should resolve");
        assert_eq!(config.csv_path, PathBuf::from("env.csv"));
        assert_eq!(config.table_name, "csv_data");
    }

    #[test]
    fn test_resolve_without_any_path_is_config_error() {
        let opt = Opt::try_parse_from(["csv_loader"]).expect("should parse");
        let err = opt.resolve(sqlite_env(&[])).expect_err("path is required");
        assert_eq!(err.field, "csv");
        assert!(err.message.contains("DEFAULT_CSV_PATH"));
    }

    #[test]
    fn test_resolve_replaces_null_tokens() {
        let opt = Opt::try_parse_from([
            "csv_loader",
            "--csv",
            "a.csv",
            "--null-token",
            "-",
            "--null-token",
            "?",
        ])
        .expect("should parse");
        let config = opt.resolve(sqlite_env(&[])).expect("should resolve");
        assert_eq!(config.null_tokens, vec!["-".to_string(), "?".to_string()]);
    }

    #[test]
    fn test_resolve_carries_log_options() {
        let opt = Opt::try_parse_from([
            "csv_loader",
            "--csv",
            "a.csv",
            "--log-level",
            "trace",
            "--log-format",
            "json",
        ])
        .expect("should parse");
        let config = opt.resolve(sqlite_env(&[])).expect("should resolve");
        assert_eq!(
            log::LevelFilter::from(config.log_level),
            log::LevelFilter::Trace
        );
        assert!(matches!(config.log_format, LogFormat::Json));
    }

    #[test]
    fn test_resolve_rejects_empty_table_name() {
        let opt = Opt::try_parse_from(["csv_loader", "--csv", "a.csv", "--table", "  "])
            .expect("should parse");
        let err = opt.resolve(sqlite_env(&[])).expect_err("empty table");
        assert_eq!(err.field, "table");
    }

    #[test]
    fn test_resolve_rejects_non_ascii_delimiter() {
        let opt = Opt::try_parse_from(["csv_loader", "--csv", "a.csv", "--delimiter", "§"])
            .expect("should parse");
        let err = opt.resolve(sqlite_env(&[])).expect_err("non-ascii delimiter");
        assert_eq!(err.field, "delimiter");
    }

    #[test]
    fn test_config_new_defaults() {
        let connection =
            ConnectionSettings::from_url("sqlite://./x.db").expect("valid sqlite url");
        let config = Config::new(PathBuf::from("in.csv"), connection);
        assert_eq!(config.table_name, "csv_data");
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.null_tokens, vec!["NA", "N/A", "null", "None"]);
        assert!(config.validate().is_ok());
    }
}
