//! CSV loading.
//!
//! Reads a delimited UTF-8 file with a header line into a typed [`Table`].
//! Column types are inferred from the whole file before any value is
//! converted, so every cell of a column shares one type.

mod infer;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use crate::clean::NullTokens;
use crate::config::DEFAULT_DELIMITER;
use crate::error_handling::ImportError;
use crate::table::{ColumnDef, Row, Table};

use infer::{convert_cell, infer_column_type};

/// Options for [`load_csv`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Tokens ignored during type inference and loaded as null in typed columns
    pub null_tokens: NullTokens,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            null_tokens: NullTokens::default(),
        }
    }
}

/// Loads a CSV file into an in-memory table.
///
/// The first line names the columns; every following record becomes one row.
/// Blank header fields are named `Unnamed: <idx>`, and repeated header names
/// are made unique by suffixing `.1`, `.2`, ... to later occurrences.
///
/// # Errors
///
/// - [`ImportError::FileAccess`] if the file cannot be opened or read
/// - [`ImportError::Parse`] if the header is missing, a record has a different
///   number of fields than the header, or the file is not valid UTF-8
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<Table, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let header = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .clone();
    if header.is_empty() {
        return Err(ImportError::parse(path, Some(1), "missing header line"));
    }
    let names = unique_column_names(&header);

    let mut records: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        records.push(record.map_err(|e| csv_error(path, e))?);
    }

    let columns: Vec<ColumnDef> = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let column_type = infer_column_type(
                records.iter().map(|r| r.get(idx).unwrap_or_default()),
                &options.null_tokens,
            );
            debug!("Column '{}' inferred as {}", name, column_type);
            ColumnDef::new(name, column_type)
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let mut values = Vec::with_capacity(columns.len());
        for (raw, column) in record.iter().zip(&columns) {
            let value = convert_cell(raw, column.column_type, &options.null_tokens)
                .ok_or_else(|| {
                    ImportError::parse(
                        path,
                        record.position().map(|p| p.line()),
                        format!(
                            "value '{}' in column '{}' is not a valid {}",
                            raw, column.name, column.column_type
                        ),
                    )
                })?;
            values.push(value);
        }
        rows.push(Row::new(values));
    }

    let table = Table::new(columns, rows)
        .map_err(|e| ImportError::parse(path, None, e.to_string()))?;

    info!(
        "Loaded {} rows with {} columns from {}",
        table.row_count(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Names blank header fields `Unnamed: <idx>` (0-based) and disambiguates
/// repeated names the way common dataframe readers do.
fn unique_column_names(header: &StringRecord) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());
    for (idx, raw) in header.iter().enumerate() {
        let mut name = if raw.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw.to_string()
        };
        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{name}.{seen}");
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        names.push(name);
    }
    names
}

fn csv_error(path: &Path, err: csv::Error) -> ImportError {
    let message = err.to_string();
    let line = err.position().map(|p| p.line());
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ImportError::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => ImportError::parse(
            path,
            line,
            format!("expected {expected_len} fields, found {len}"),
        ),
        csv::ErrorKind::Utf8 { .. } => {
            ImportError::parse(path, line, "file is not valid UTF-8")
        }
        _ => ImportError::parse(path, line, message),
    }
}
