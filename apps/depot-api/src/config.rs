//! Depot API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default            |
//! |---------------------------|--------------------|
//! | `GRPC_PORT`               | `50051`            |
//! | `DATABASE_URL`            | `./data/depot.db`  |
//! | `DB_MAX_CONNECTIONS`      | `10`               |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30`               |
//! | `REQUEST_TIMEOUT_SECS`    | `30`               |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use depot_db::DbConfig;

/// Depot API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// gRPC server port
    pub grpc_port: u16,

    /// SQLite database path, or `:memory:`
    pub database_url: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Pool acquire timeout in seconds
    pub db_connect_timeout_secs: u64,

    /// Per-request deadline in seconds; the handler future is dropped when it
    /// elapses
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            grpc_port: parse_or(&lookup, "GRPC_PORT", 50051)?,

            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "./data/depot.db".to_string()),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,

            db_connect_timeout_secs: parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", 30)?,

            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
        };

        if config.database_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_URL".to_string()));
        }

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Storage settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .unwrap_or(&self.database_url);

        if path == ":memory:" {
            return DbConfig::in_memory();
        }

        DbConfig::new(path)
            .max_connections(self.db_max_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
