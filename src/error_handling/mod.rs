//! Error handling.
//!
//! This module provides the error taxonomy of an import run:
//! - **Config**: missing or invalid configuration
//! - **Load**: the input file is unreadable or malformed
//! - **Connect**: the database cannot be reached
//! - **Schema**: the destination table cannot be checked or created
//! - **Write**: a row was rejected or the connection was lost mid-load
//!
//! Stages fail fast; the first error ends the run.

mod types;

// Re-export public API
pub use types::{ConfigError, ImportError, InitializationError, Stage};
