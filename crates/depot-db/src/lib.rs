//! # depot-db: Entity Store Adapters for Depot
//!
//! Storage access for the six inventory entities. Each entity has one
//! repository implementing [`EntityStore`]; the four entities with a unique
//! attribute also implement [`AttributeLookup`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Depot Data Flow                                  │
//! │                                                                         │
//! │  depot-service (ProductService::create)                                │
//! │       │   count_by_attribute(Sku, ..)   exists_by_id(category)         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     depot-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ Category Product │   │ (embedded)  │  │   │
//! │  │   │   SqlitePool  │    │ Warehouse ...    │   │             │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage: primary keys + secondary indexes, nothing else              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema
//! - [`error`] - Storage fault type
//! - [`repository`] - Capability traits and per-entity repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depot_db::{Attribute, AttributeLookup, Database, DbConfig, EntityStore};
//!
//! let db = Database::new(DbConfig::new("./data/depot.db")).await?;
//! let taken = db.categories().count_by_attribute(Attribute::Name, "Tools").await? > 0;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{Attribute, AttributeLookup, EntityStore, UniqueEntityStore};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::inventory_item::InventoryItemRepository;
pub use repository::product::ProductRepository;
pub use repository::stock_movement::StockMovementRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::warehouse::WarehouseRepository;
