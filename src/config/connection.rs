//! Database connection settings.
//!
//! The connection target comes either from `DATABASE_URL` or from the
//! individual `DB_HOST`/`DB_PORT`/`DB_NAME`/`DB_USER`/`DB_PASSWORD` variables,
//! which always describe a PostgreSQL server. Host, port, user and password
//! also accept the unprefixed `HOST`/`PORT`/`USER`/`PASSWORD` names; the
//! `DB_*` name wins when both are set.

use std::fmt;

use url::Url;

use crate::config::constants::{
    DEFAULT_DB_HOST, DEFAULT_DB_PORT, ENV_DATABASE_URL, ENV_DB_HOST, ENV_DB_NAME,
    ENV_DB_PASSWORD, ENV_DB_PORT, ENV_DB_USER, ENV_HOST, ENV_PASSWORD, ENV_PORT, ENV_USER,
};
use crate::error_handling::ConfigError;

const SUPPORTED_SCHEMES: &[&str] = &["postgres", "postgresql", "sqlite"];

/// Resolved database connection target.
///
/// `Display` and `Debug` mask the password so the value can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    url: Url,
}

impl ConnectionSettings {
    /// Parses a full connection URL (`postgres://…` or `sqlite://…`).
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| {
            ConfigError::new(ENV_DATABASE_URL, format!("not a valid connection URL: {e}"))
        })?;
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(ConfigError::new(
                ENV_DATABASE_URL,
                format!(
                    "unsupported scheme '{}' (expected one of: {})",
                    url.scheme(),
                    SUPPORTED_SCHEMES.join(", ")
                ),
            ));
        }
        Ok(Self { url })
    }

    /// Resolves settings from an environment lookup function.
    ///
    /// `DATABASE_URL` wins when present. Otherwise the database name
    /// (`DB_NAME`) and user (`DB_USER`, then `USER`) are required, host
    /// (`DB_HOST`, then `HOST`) and port (`DB_PORT`, then `PORT`) fall back to
    /// `localhost:5432`, and the password (`DB_PASSWORD`, then `PASSWORD`) may
    /// be absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        // (variable that was set, value)
        let first = |keys: [&'static str; 2]| keys.into_iter().find_map(|k| get(k).map(|v| (k, v)));

        if let Some(raw) = get(ENV_DATABASE_URL) {
            return Self::from_url(raw.trim());
        }

        let host = first([ENV_DB_HOST, ENV_HOST])
            .map(|(_, v)| v)
            .unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
        let port = match first([ENV_DB_PORT, ENV_PORT]) {
            Some((key, raw)) => raw.trim().parse::<u16>().ok().filter(|p| *p > 0).ok_or_else(|| {
                ConfigError::new(key, format!("'{raw}' is not a valid port (1-65535)"))
            })?,
            None => DEFAULT_DB_PORT,
        };
        let name = get(ENV_DB_NAME).ok_or_else(|| missing(ENV_DB_NAME, None))?;
        let (_, user) =
            first([ENV_DB_USER, ENV_USER]).ok_or_else(|| missing(ENV_DB_USER, Some(ENV_USER)))?;
        let password = lookup(ENV_DB_PASSWORD)
            .or_else(|| lookup(ENV_PASSWORD))
            .unwrap_or_default();

        Self::postgres(&host, port, &name, &user, &password)
    }

    fn postgres(
        host: &str,
        port: u16,
        database: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, ConfigError> {
        let mut url = Url::parse("postgres://localhost")
            .map_err(|e| ConfigError::new(ENV_DB_HOST, e.to_string()))?;
        url.set_host(Some(host.trim()))
            .map_err(|e| ConfigError::new(ENV_DB_HOST, format!("'{host}' is not a valid host: {e}")))?;
        url.set_port(Some(port))
            .map_err(|_| ConfigError::new(ENV_DB_PORT, format!("cannot use port {port}")))?;
        url.set_username(user)
            .map_err(|_| ConfigError::new(ENV_DB_USER, "cannot be used in a connection URL"))?;
        if !password.is_empty() {
            url.set_password(Some(password)).map_err(|_| {
                ConfigError::new(ENV_DB_PASSWORD, "cannot be used in a connection URL")
            })?;
        }
        url.path_segments_mut()
            .map_err(|_| ConfigError::new(ENV_DB_NAME, "cannot be used in a connection URL"))?
            .push(database.trim());
        Ok(Self { url })
    }

    /// Connection URL passed to the database driver (contains the password).
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// URL scheme, e.g. `postgres` or `sqlite`.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    fn redacted(&self) -> String {
        let mut shown = self.url.clone();
        if shown.password().is_some() {
            let _ = shown.set_password(Some("*****"));
        }
        shown.to_string()
    }
}

fn missing(var: &str, alias: Option<&str>) -> ConfigError {
    let alias = alias.map(|a| format!(" or {a}")).unwrap_or_default();
    ConfigError::new(
        var,
        format!("required connection parameter is not set (set {var}{alias}, or {ENV_DATABASE_URL})"),
    )
}

impl fmt::Display for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.redacted())
            .finish()
    }
}
