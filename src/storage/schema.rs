//! Destination table resolution.
//!
//! An existing table is used as-is: its columns are never compared with the
//! CSV's and never altered. A missing table is created from the loaded
//! columns, in header order.

use log::{debug, info};

use crate::error_handling::ImportError;
use crate::table::ColumnDef;

use super::connection::{quote_identifier, Destination, Dialect};

/// Outcome of [`ensure_table_exists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// The table was already present; no DDL was issued.
    Existing,
    /// The table was created by this call.
    Created,
}

impl TableStatus {
    pub fn was_created(&self) -> bool {
        matches!(self, TableStatus::Created)
    }
}

/// Makes sure `table_name` exists, creating it from `columns` if it does not.
///
/// # Errors
///
/// Returns [`ImportError::Schema`] if the metadata query or the `CREATE TABLE`
/// statement fails.
pub async fn ensure_table_exists(
    dest: &mut Destination,
    table_name: &str,
    columns: &[ColumnDef],
) -> Result<TableStatus, ImportError> {
    let schema_error = |source| ImportError::Schema {
        table: table_name.to_string(),
        source,
    };

    if table_exists(dest, table_name).await.map_err(schema_error)? {
        info!("Table '{}' already exists; appending", table_name);
        return Ok(TableStatus::Existing);
    }

    let ddl = create_table_sql(dest.dialect(), table_name, columns);
    debug!("Creating table: {}", ddl);
    sqlx::query(&ddl)
        .execute(dest.connection())
        .await
        .map_err(schema_error)?;

    info!(
        "Created table '{}' with {} columns",
        table_name,
        columns.len()
    );
    Ok(TableStatus::Created)
}

/// Checks the catalog of the connection's default schema for `table_name`.
pub async fn table_exists(dest: &mut Destination, table_name: &str) -> Result<bool, sqlx::Error> {
    let query = dest.dialect().table_exists_query();
    let count: i64 = sqlx::query_scalar(query)
        .bind(table_name)
        .fetch_one(dest.connection())
        .await?;
    Ok(count > 0)
}

fn create_table_sql(dialect: Dialect, table_name: &str, columns: &[ColumnDef]) -> String {
    let column_sql: Vec<String> = columns
        .iter()
        .map(|c| {
            format!(
                "{} {}",
                quote_identifier(&c.name),
                dialect.column_type(c.column_type)
            )
        })
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(table_name),
        column_sql.join(", ")
    )
}
