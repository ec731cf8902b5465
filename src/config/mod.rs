//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, environment variable names)
//! - Database connection settings resolved from the environment
//! - CLI option types and parsing

mod connection;
mod constants;
mod types;

// Re-export all constants
pub use connection::ConnectionSettings;
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
