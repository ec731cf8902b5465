//! Error type definitions.
//!
//! This module defines the error types used throughout the application. Every
//! import failure maps to exactly one [`Stage`].

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Invalid or missing configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid configuration for {field}: {message}")]
pub struct ConfigError {
    /// CLI option or environment variable at fault
    pub field: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Pipeline stage in which an import failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, DisplayMacro)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Config,
    Load,
    Connect,
    Schema,
    Write,
}

/// Errors that abort an import run.
///
/// The first failure anywhere ends the run; nothing is retried.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Missing or invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input file does not exist or cannot be read.
    #[error("cannot read input file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not well-formed CSV.
    #[error("malformed CSV in {}{}: {message}", path.display(), line_suffix(*line))]
    Parse {
        path: PathBuf,
        /// 1-based line number, when known
        line: Option<u64>,
        message: String,
    },

    /// The database could not be reached or its backend is unsupported.
    #[error("cannot connect to {target}: {message}")]
    Connection {
        /// Connection target with the password masked
        target: String,
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    /// Checking for or creating the destination table failed.
    #[error("cannot prepare table \"{table}\": {source}")]
    Schema {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    /// The database rejected a row or the connection was lost while inserting.
    #[error("insert into \"{table}\" failed at data row {row}: {source}")]
    Write {
        table: String,
        /// 1-based index of the failing row in the cleaned table
        row: usize,
        #[source]
        source: sqlx::Error,
    },
}

fn line_suffix(line: Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

impl ImportError {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            ImportError::Config(_) => Stage::Config,
            ImportError::FileAccess { .. } | ImportError::Parse { .. } => Stage::Load,
            ImportError::Connection { .. } => Stage::Connect,
            ImportError::Schema { .. } => Stage::Schema,
            ImportError::Write { .. } => Stage::Write,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, line: Option<u64>, message: impl Into<String>) -> Self {
        ImportError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}
