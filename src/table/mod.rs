//! In-memory table shared by all pipeline stages.
//!
//! A [`Table`] is a fixed list of [`ColumnDef`]s plus rows whose width always
//! matches it. The column list is computed once by the loader and carried
//! unchanged through cleaning, schema creation and insertion.

mod value;

pub use value::{ColumnType, Value};

/// Column name and inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// One record: values in column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returned when a row does not have exactly one value per column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {row} has {found} values but the table has {expected} columns")]
pub struct RowWidthError {
    /// 0-based row index
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// Rows sharing one fixed set of typed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table, rejecting any row whose width differs from `columns`.
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>) -> Result<Self, RowWidthError> {
        if let Some((row, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(RowWidthError {
                row,
                expected: columns.len(),
                found: bad.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (`row`, column `name`).
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| &r.values[col])
    }

    /// Row `row` as ordered (column name, value) pairs.
    pub fn row_map(&self, row: usize) -> Option<Vec<(&str, &Value)>> {
        let r = self.rows.get(row)?;
        Some(self.column_names().zip(r.values.iter()).collect())
    }

    /// Mutable access for the cleaner; widths cannot change through it.
    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }
}
