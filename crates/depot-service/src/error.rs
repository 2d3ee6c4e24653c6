//! # Service Error Types
//!
//! The four outcomes a caller of the rules engine can observe.
//!
//! ```text
//! ValidationError ──► InvalidArgument   (malformed identifier)
//! rule violation  ──► NotFound          (target or referenced entity absent)
//!                 ──► AlreadyExists     (name / sku taken)
//! DbError         ──► Internal          (storage fault, cause kept as source)
//! ```
//!
//! A storage fault is never reported as `NotFound`: a timeout while checking
//! that a category exists says nothing about whether it does.

use depot_core::ValidationError;
use depot_db::DbError;
use thiserror::Error;
use tracing::error;

/// Errors returned by the rules engine.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("storage failure while {context}")]
    Internal {
        context: String,
        #[source]
        source: DbError,
    },
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        ServiceError::AlreadyExists(message.into())
    }

    /// Wraps a storage fault, logging it once at the point it is classified.
    ///
    /// ```rust,ignore
    /// store.insert(&category).await.map_err(ServiceError::storage("inserting category"))?;
    /// ```
    pub fn storage(context: impl Into<String>) -> impl FnOnce(DbError) -> ServiceError {
        let context = context.into();
        move |source| {
            error!(context = %context, error = %source, "Storage fault");
            ServiceError::Internal { context, source }
        }
    }
}

/// Result type for rules-engine operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_internal_keeps_source() {
        let err = ServiceError::storage("checking category name")(DbError::PoolExhausted);

        assert_eq!(
            err.to_string(),
            "storage failure while checking category name"
        );
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Connection pool exhausted"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ServiceError = ValidationError::Required {
            field: "id".to_string(),
        }
        .into();

        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }
}
