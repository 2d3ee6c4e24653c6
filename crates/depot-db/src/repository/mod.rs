//! # Repository Module
//!
//! Entity store adapters for the six inventory entities.
//!
//! ## Capability Traits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Capabilities                                   │
//! │                                                                         │
//! │  EntityStore<T>            every entity                                │
//! │  ├── insert(&T)                                                        │
//! │  ├── get_by_id(id)      → Option<T>                                    │
//! │  ├── list_all()         → Vec<T>                                       │
//! │  ├── update(&T)            upsert by primary key                       │
//! │  ├── delete(id)            idempotent                                  │
//! │  └── exists_by_id(id)   → bool                                         │
//! │                                                                         │
//! │  AttributeLookup           Category, Product, Warehouse, Supplier      │
//! │  ├── count_by_attribute(attr, value)    → i64                          │
//! │  └── list_ids_by_attribute(attr, value) → Vec<EntityId>                │
//! │                                                                         │
//! │  UniqueEntityStore<T> = EntityStore<T> + AttributeLookup               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The traits are object safe so depot-service can hold
//! `Arc<dyn UniqueEntityStore<Product>>` and tests can slot in wrappers.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - lookup by name
//! - [`ProductRepository`](product::ProductRepository) - lookup by name and sku
//! - [`WarehouseRepository`](warehouse::WarehouseRepository) - lookup by name
//! - [`SupplierRepository`](supplier::SupplierRepository) - lookup by name
//! - [`InventoryItemRepository`](inventory_item::InventoryItemRepository)
//! - [`StockMovementRepository`](stock_movement::StockMovementRepository)

use async_trait::async_trait;
use depot_core::{Entity, EntityId};
use std::fmt;

use crate::error::DbResult;

pub mod category;
pub mod inventory_item;
pub mod product;
pub mod stock_movement;
pub mod supplier;
pub mod warehouse;

mod support;

// =============================================================================
// Attribute
// =============================================================================

/// Secondary attribute a store can be queried by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Sku,
}

impl Attribute {
    /// Column backing this attribute.
    pub const fn column(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Sku => "sku",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// =============================================================================
// Capability Traits
// =============================================================================

/// Primary-key CRUD for one entity type.
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Persists a new entity. The entity's id must already be assigned.
    async fn insert(&self, entity: &T) -> DbResult<()>;

    /// Fetches one entity. `Ok(None)` when no row has this id.
    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<T>>;

    /// Every stored entity, in storage order.
    async fn list_all(&self) -> DbResult<Vec<T>>;

    /// Overwrites the row with the entity's id, creating it if absent.
    async fn update(&self, entity: &T) -> DbResult<()>;

    /// Removes the row if present. Deleting a missing id succeeds.
    async fn delete(&self, id: EntityId) -> DbResult<()>;

    /// Whether a row with this id exists.
    async fn exists_by_id(&self, id: EntityId) -> DbResult<bool>;
}

/// Secondary-index queries used for uniqueness pre-checks.
#[async_trait]
pub trait AttributeLookup: Send + Sync {
    /// Number of rows whose attribute equals `value` exactly.
    async fn count_by_attribute(&self, attribute: Attribute, value: &str) -> DbResult<i64>;

    /// Ids of rows whose attribute equals `value` exactly.
    async fn list_ids_by_attribute(
        &self,
        attribute: Attribute,
        value: &str,
    ) -> DbResult<Vec<EntityId>>;
}

/// A store for an entity with a unique attribute.
pub trait UniqueEntityStore<T: Entity>: EntityStore<T> + AttributeLookup {}

impl<T, S> UniqueEntityStore<T> for S
where
    T: Entity,
    S: EntityStore<T> + AttributeLookup + ?Sized,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_columns() {
        assert_eq!(Attribute::Name.column(), "name");
        assert_eq!(Attribute::Sku.column(), "sku");
        assert_eq!(Attribute::Sku.to_string(), "sku");
    }
}
