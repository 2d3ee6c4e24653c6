//! Error types for the Depot API.
//!
//! ```text
//! ValidationError ─┐
//!                  ├─► ApiError ─► tonic::Status
//! ServiceError ────┘
//! ```

use depot_core::ValidationError;
use depot_db::DbError;
use depot_service::ServiceError;
use tonic::Status;
use tracing::warn;

use crate::config::ConfigError;

/// Depot API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),
}

impl ApiError {
    /// A required message field was absent from the request.
    pub fn missing(field: &str) -> Self {
        ApiError::InvalidRequest(ValidationError::Required {
            field: field.to_string(),
        })
    }
}

impl From<ApiError> for Status {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::InvalidRequest(err)
            | ApiError::Service(ServiceError::InvalidArgument(err)) => {
                warn!(error = %err, "Rejected invalid request");
                Status::invalid_argument(err.to_string())
            }
            ApiError::Service(ServiceError::NotFound(msg)) => {
                warn!(reason = %msg, "Rejected: not found");
                Status::not_found(msg)
            }
            ApiError::Service(ServiceError::AlreadyExists(msg)) => {
                warn!(reason = %msg, "Rejected: already exists");
                Status::already_exists(msg)
            }
            // Already logged with its cause where it was classified.
            ApiError::Service(err @ ServiceError::Internal { .. }) => {
                Status::internal(err.to_string())
            }
            ApiError::Unavailable(msg) => Status::unavailable(msg),
            other => Status::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_taxonomy_maps_to_status_codes() {
        let cases = [
            (ApiError::missing("product"), Code::InvalidArgument),
            (
                ServiceError::InvalidArgument(ValidationError::invalid_format("id", "bad")).into(),
                Code::InvalidArgument,
            ),
            (
                ServiceError::not_found("product not found").into(),
                Code::NotFound,
            ),
            (
                ServiceError::already_exists("taken").into(),
                Code::AlreadyExists,
            ),
            (
                ServiceError::Internal {
                    context: "listing product".to_string(),
                    source: DbError::PoolExhausted,
                }
                .into(),
                Code::Internal,
            ),
        ];

        for (error, code) in cases {
            assert_eq!(Status::from(error).code(), code);
        }
    }

    #[test]
    fn test_rule_violation_message_reaches_client() {
        let status = Status::from(ApiError::from(ServiceError::already_exists(
            "category with the same name already exists",
        )));

        assert_eq!(
            status.message(),
            "category with the same name already exists"
        );
    }
}
