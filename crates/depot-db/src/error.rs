//! # Database Error Types
//!
//! Storage faults raised by the entity store adapters.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / malformed row                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError::Internal (depot-service) ← cause kept as #[source]      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Status::internal (depot-api)                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `DbError` is never a business outcome. "Row absent" is `Ok(None)` or
//! `Ok(false)`, not an error.

use thiserror::Error;

use crate::repository::Attribute;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Statement execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored row could not be turned back into an entity.
    ///
    /// ## When This Occurs
    /// - Identifier column that does not hold a UUID
    /// - Stock movement type outside 0..=2
    #[error("Malformed {table}.{column}: {reason}")]
    Decode {
        table: &'static str,
        column: &'static str,
        reason: String,
    },

    /// Lookup on a column the table has no secondary index for.
    #[error("{table} has no secondary lookup on {attribute}")]
    UnsupportedAttribute {
        table: &'static str,
        attribute: Attribute,
    },

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a Decode error.
    pub fn decode(table: &'static str, column: &'static str, reason: impl Into<String>) -> Self {
        DbError::Decode {
            table,
            column,
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::ColumnDecode   → DbError::Decode
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::ColumnDecode { index, source } => DbError::Decode {
                table: "row",
                column: "column",
                reason: format!("{index}: {source}"),
            },

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
