//! # depot-core: Inventory Domain Types
//!
//! Plain entity definitions, identifier assignment and identifier parsing for
//! the Depot inventory service. Nothing in this crate touches storage or the
//! network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 depot-api (gRPC boundary)                       │   │
//! │  │     wire message ──► entity ──► service ──► Status / reply      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 depot-service (rules engine)                    │   │
//! │  │     uniqueness pre-checks, reference checks, error taxonomy     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 depot-db (entity store adapters)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ★ depot-core (THIS CRATE) is used by all three layers ★               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The six entities and [`MovementType`]
//! - [`identity`] - Fresh identifier assignment
//! - [`validation`] - Identifier parsing for untrusted input
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::{identity, validation::parse_id};
//!
//! let id = identity::new_id();
//! let parsed = parse_id("id", &id.to_string()).unwrap();
//! assert_eq!(id, parsed);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod identity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use identity::{new_id, EntityId};
pub use types::*;
