//! Process-level setup performed once before an import runs.

mod logger;

pub use logger::{init_logger, init_logger_with};
