//! Server configuration parsed from environment variables.

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "todos.db";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SERVER_PORT: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    /// Read and logged; nothing branches on it.
    pub environment: String,
    pub db_max_connections: u32,
}

impl Config {
    /// Build typed config from the process environment, after loading `.env`
    /// if one exists.
    ///
    /// Optional:
    /// - `SERVER_PORT`: default 8080
    /// - `DATABASE_URL`: SQLite path or `sqlite:` URL, default `todos.db`
    /// - `ENVIRONMENT`: default `development`
    /// - `DB_MAX_CONNECTIONS`: default 5; unparseable values fall back
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside local development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary variable lookup. Empty values are
    /// treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_PORT` is not a valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_SERVER_PORT,
        };
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let environment = get("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned());
        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);

        Ok(Self { server_port, database_url, environment, db_max_connections })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
