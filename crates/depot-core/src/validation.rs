//! # Validation Module
//!
//! Identifier parsing and field checks for untrusted input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: gRPC boundary (depot-api)                                    │
//! │  └── THIS MODULE: every id string must parse as a UUID                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rules engine (depot-service)                                 │
//! │  ├── Uniqueness pre-checks (name, sku)                                 │
//! │  └── Reference pre-checks (category, product, warehouse)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage                                                       │
//! │  └── Primary keys only. No UNIQUE, no FOREIGN KEY.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A parse failure is a client-input error, never a storage error.

use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::identity::EntityId;

/// Parses a required identifier.
///
/// ## Example
/// ```rust
/// use depot_core::validation::parse_id;
///
/// assert!(parse_id("id", "67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
/// assert!(parse_id("id", "").is_err());
/// assert!(parse_id("id", "not-a-uuid").is_err());
/// ```
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<EntityId> {
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Uuid::parse_str(raw).map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Parses an optional identifier. An empty string means "absent".
///
/// ## Example
/// ```rust
/// use depot_core::validation::parse_optional_id;
///
/// assert_eq!(parse_optional_id("source_warehouse_id", "").unwrap(), None);
/// assert!(parse_optional_id("source_warehouse_id", "xyz").is_err());
/// ```
pub fn parse_optional_id(field: &str, raw: &str) -> ValidationResult<Option<EntityId>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_id(field, raw).map(Some)
}

/// Rejects prices storage cannot hold: NaN and the infinities.
///
/// ## Example
/// ```rust
/// use depot_core::validation::validate_price;
///
/// assert!(validate_price(9.5).is_ok());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::invalid_format("price", "must be finite"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_id;

    #[test]
    fn test_parse_id_round_trips_hyphenated_form() {
        let id = new_id();
        assert_eq!(parse_id("id", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_surrounding_whitespace() {
        let id = new_id();
        assert!(matches!(
            parse_id("id", &format!("  {id} ")),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_id_empty_is_required() {
        assert_eq!(
            parse_id("product_id", ""),
            Err(ValidationError::Required {
                field: "product_id".to_string()
            })
        );
    }

    #[test]
    fn test_parse_id_garbage_is_invalid_format() {
        let err = parse_id("warehouse_id", "12345").unwrap_err();
        match err {
            ValidationError::InvalidFormat { field, .. } => assert_eq!(field, "warehouse_id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_optional_id() {
        let id = new_id();
        assert_eq!(parse_optional_id("f", "").unwrap(), None);
        assert_eq!(parse_optional_id("f", &id.to_string()).unwrap(), Some(id));
        assert!(parse_optional_id("f", "nope").is_err());
    }

    #[test]
    fn test_validate_price_rejects_non_finite() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-3.25).is_ok());

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match validate_price(price) {
                Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "price"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
