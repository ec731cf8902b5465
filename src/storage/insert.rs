//! Row insertion.
//!
//! Rows are written one parameterized `INSERT` at a time on the run's single
//! connection, without an enclosing transaction. A failure stops the run;
//! rows inserted before it stay in the table.

use log::{debug, info};
use sqlx::any::{Any, AnyArguments};
use sqlx::query::Query;

use crate::config::DATE_OUTPUT_FORMAT;
use crate::error_handling::ImportError;
use crate::table::{ColumnType, Table, Value};

use super::connection::{quote_identifier, Destination, Dialect};

type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Appends every row of `table` to `table_name`, in order.
///
/// Columns are addressed by name, so the destination may have extra columns
/// (left to their defaults) or a different column order. Returns the number of
/// rows inserted.
///
/// # Errors
///
/// Returns [`ImportError::Write`] naming the 1-based row the database rejected,
/// or the row being written when the connection failed.
pub async fn insert_rows(
    dest: &mut Destination,
    table_name: &str,
    table: &Table,
) -> Result<u64, ImportError> {
    if table.is_empty() {
        info!("No rows to insert into '{}'", table_name);
        return Ok(0);
    }

    let sql = insert_sql(dest.dialect(), table_name, table);
    debug!("Insert statement: {}", sql);

    let column_types: Vec<ColumnType> = table.columns().iter().map(|c| c.column_type).collect();
    let mut inserted = 0u64;

    for (idx, row) in table.rows().iter().enumerate() {
        let mut query = sqlx::query(&sql);
        for (value, column_type) in row.values().iter().zip(&column_types) {
            query = bind_value(query, value, *column_type);
        }
        query
            .execute(dest.connection())
            .await
            .map_err(|source| ImportError::Write {
                table: table_name.to_string(),
                row: idx + 1,
                source,
            })?;
        inserted += 1;
    }

    info!("Inserted {} rows into '{}'", inserted, table_name);
    Ok(inserted)
}

fn insert_sql(dialect: Dialect, table_name: &str, table: &Table) -> String {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect();
    let placeholders: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, c)| dialect.placeholder(idx + 1, c.column_type))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table_name),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Binds one cell. Nulls carry the column's type so the driver can describe
/// the parameter.
fn bind_value<'q>(query: AnyQuery<'q>, value: &'q Value, column_type: ColumnType) -> AnyQuery<'q> {
    match value {
        Value::Text(text) => query.bind(text.as_str()),
        Value::Integer(n) => query.bind(*n),
        Value::Float(x) => query.bind(*x),
        Value::Date(d) => query.bind(d.format(DATE_OUTPUT_FORMAT).to_string()),
        Value::Null => match column_type {
            ColumnType::Integer => query.bind(None::<i64>),
            ColumnType::Float => query.bind(None::<f64>),
            ColumnType::Text | ColumnType::Date => query.bind(None::<String>),
        },
    }
}
