//! Table cleaning.
//!
//! Three passes over the loaded table:
//! 1. trim leading/trailing whitespace from text cells
//! 2. replace missing-value tokens in text cells with `Null`
//! 3. drop rows that exactly repeat an earlier row
//!
//! Cleaning never fails and is idempotent.

mod tokens;

use std::collections::HashSet;

use log::{debug, info};

use crate::table::{Table, Value};

pub use tokens::NullTokens;

/// Counts gathered while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Text cells whose value changed by trimming
    pub cells_trimmed: usize,
    /// Text cells replaced by `Null`
    pub nulls_normalized: usize,
    pub duplicates_removed: usize,
}

/// Cleans `table` in place and returns it with statistics.
pub fn clean_table(mut table: Table, null_tokens: &NullTokens) -> (Table, CleanStats) {
    let mut stats = CleanStats {
        rows_before: table.row_count(),
        ..CleanStats::default()
    };

    for row in table.rows_mut().iter_mut() {
        for value in row.values_mut() {
            normalize_cell(value, null_tokens, &mut stats);
        }
    }

    stats.duplicates_removed = drop_duplicate_rows(&mut table);
    stats.rows_after = table.row_count();

    debug!(
        "Trimmed {} cells, normalized {} missing values",
        stats.cells_trimmed, stats.nulls_normalized
    );
    info!(
        "Cleaned table: {} rows -> {} rows ({} duplicates removed)",
        stats.rows_before, stats.rows_after, stats.duplicates_removed
    );
    (table, stats)
}

fn normalize_cell(value: &mut Value, null_tokens: &NullTokens, stats: &mut CleanStats) {
    let Value::Text(text) = value else {
        return;
    };
    if null_tokens.is_null(text) {
        *value = Value::Null;
        stats.nulls_normalized += 1;
        return;
    }
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        *text = trimmed.to_string();
        stats.cells_trimmed += 1;
    }
}

/// Keeps the first occurrence of every distinct row, preserving order.
fn drop_duplicate_rows(table: &mut Table) -> usize {
    let before = table.row_count();
    let mut seen = HashSet::with_capacity(before);
    table.rows_mut().retain(|row| seen.insert(row.clone()));
    before - table.row_count()
}
