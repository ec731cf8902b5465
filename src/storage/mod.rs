//! Database side of an import: one connection, the destination table, and
//! the row writer.

mod connection;
mod insert;
mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use connection::{connect, quote_identifier, Destination, Dialect};
pub use insert::insert_rows;
pub use schema::{ensure_table_exists, table_exists, TableStatus};
