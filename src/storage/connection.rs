//! Database connection management.
//!
//! A run opens exactly one connection through sqlx's `Any` driver, uses it for
//! the schema check and the inserts, and closes it when the run ends. The
//! backend behind the connection decides the SQL [`Dialect`].

use log::{info, warn};
use sqlx::any::install_default_drivers;
use sqlx::{AnyConnection, Connection};

use crate::config::ConnectionSettings;
use crate::error_handling::ImportError;
use crate::table::ColumnType;

/// Backend-specific SQL rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Maps the driver's backend name (`AnyConnection::backend_name`).
    pub fn from_backend_name(name: &str) -> Option<Self> {
        match name {
            "PostgreSQL" => Some(Dialect::Postgres),
            "SQLite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// Column type used when creating a table.
    pub fn column_type(&self, column_type: ColumnType) -> &'static str {
        match (self, column_type) {
            (Dialect::Postgres, ColumnType::Integer) => "BIGINT",
            (Dialect::Postgres, ColumnType::Float) => "DOUBLE PRECISION",
            (Dialect::Sqlite, ColumnType::Integer) => "INTEGER",
            (Dialect::Sqlite, ColumnType::Float) => "REAL",
            (_, ColumnType::Date) => "DATE",
            (_, ColumnType::Text) => "TEXT",
        }
    }

    /// Bind placeholder for the `index`-th (1-based) parameter.
    ///
    /// Dates travel as ISO text; PostgreSQL needs an explicit cast for them.
    pub fn placeholder(&self, index: usize, column_type: ColumnType) -> String {
        match (self, column_type) {
            (Dialect::Postgres, ColumnType::Date) => format!("CAST(${index} AS DATE)"),
            (Dialect::Postgres, _) => format!("${index}"),
            (Dialect::Sqlite, _) => "?".to_string(),
        }
    }

    /// Metadata query counting tables with the bound name.
    pub fn table_exists_query(&self) -> &'static str {
        match self {
            Dialect::Postgres => {
                "SELECT COUNT(*) FROM information_schema.tables
                 WHERE table_schema = current_schema() AND table_name = $1"
            }
            Dialect::Sqlite => "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        }
    }
}

/// Quotes an identifier so any table or column name is used verbatim.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// The single open connection of a run.
pub struct Destination {
    conn: AnyConnection,
    dialect: Dialect,
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Destination")
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

impl Destination {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn connection(&mut self) -> &mut AnyConnection {
        &mut self.conn
    }

    /// Closes the connection gracefully. Failures are logged, not returned.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!("Failed to close database connection cleanly: {e}");
        }
    }
}

/// Opens the connection described by `settings`.
///
/// # Errors
///
/// Returns [`ImportError::Connection`] if the database is unreachable or the
/// backend is neither PostgreSQL nor SQLite.
pub async fn connect(settings: &ConnectionSettings) -> Result<Destination, ImportError> {
    install_default_drivers();

    let conn = AnyConnection::connect(settings.url())
        .await
        .map_err(|e| ImportError::Connection {
            target: settings.to_string(),
            message: e.to_string(),
            source: Some(e),
        })?;

    let backend = conn.backend_name().to_string();
    let Some(dialect) = Dialect::from_backend_name(&backend) else {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {e}");
        }
        return Err(ImportError::Connection {
            target: settings.to_string(),
            message: format!("unsupported database backend '{backend}'"),
            source: None,
        });
    };

    info!("Connected to {} ({})", settings, backend);
    Ok(Destination { conn, dialect })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(
            Dialect::from_backend_name("PostgreSQL"),
            Some(Dialect::Postgres)
        );
        assert_eq!(Dialect::from_backend_name("SQLite"), Some(Dialect::Sqlite));
        assert_eq!(Dialect::from_backend_name("MySQL"), None);
    }

    #[test]
    fn test_column_types() {
        let pg = Dialect::Postgres;
        assert_eq!(pg.column_type(ColumnType::Integer), "BIGINT");
        assert_eq!(pg.column_type(ColumnType::Float), "DOUBLE PRECISION");
        assert_eq!(pg.column_type(ColumnType::Date), "DATE");
        assert_eq!(pg.column_type(ColumnType::Text), "TEXT");

        let lite = Dialect::Sqlite;
        assert_eq!(lite.column_type(ColumnType::Integer), "INTEGER");
        assert_eq!(lite.column_type(ColumnType::Float), "REAL");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::Postgres.placeholder(3, ColumnType::Text), "$3");
        assert_eq!(
            Dialect::Postgres.placeholder(1, ColumnType::Date),
            "CAST($1 AS DATE)"
        );
        assert_eq!(Dialect::Sqlite.placeholder(7, ColumnType::Date), "?");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("name"), "\"name\"");
        assert_eq!(quote_identifier("my \"odd\" col"), "\"my \"\"odd\"\" col\"");
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let settings = ConnectionSettings::from_url("sqlite::memory:").expect("valid url");
        let dest = connect(&settings).await.expect("in-memory sqlite");
        assert_eq!(dest.dialect(), Dialect::Sqlite);
        dest.close().await;
    }

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // mode=ro on a missing file cannot be opened
        let url = format!("sqlite://{}?mode=ro", dir.path().join("absent.db").display());
        let settings = ConnectionSettings::from_url(&url).expect("valid url");
        let err = connect(&settings).await.expect_err("file does not exist");
        assert!(matches!(err, ImportError::Connection { .. }), "{err:?}");
    }
}
