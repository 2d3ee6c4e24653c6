//! # Domain Types
//!
//! The six inventory entities.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────┐        ┌─────────────┐        ┌─────────────┐         │
//! │  │  Category   │◄───────│   Product   │◄───┐   │  Warehouse  │         │
//! │  │  name (U)   │  FK*   │  name (U)   │    │   │  name (U)   │         │
//! │  └─────────────┘        │  sku  (U)   │    │   └──────▲──────┘         │
//! │                         └─────────────┘    │          │ FK*            │
//! │                                            │  ┌───────┴───────┐        │
//! │  ┌─────────────┐                           └──│ InventoryItem │        │
//! │  │  Supplier   │                        FK*   └───────▲───────┘        │
//! │  │  name (U)   │                                      ┆ (unchecked)    │
//! │  └─────────────┘                              ┌───────┴───────┐        │
//! │                                               │ StockMovement │        │
//! │                                               └───────────────┘        │
//! │                                                                         │
//! │  (U)  unique, emulated by depot-service                                │
//! │  FK*  reference, emulated by depot-service                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity carries an immutable UUID assigned on create. Mutation is by
//! full-record replacement only.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::EntityId;

// =============================================================================
// Entity Trait
// =============================================================================

/// Which of the six entity types a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Product,
    Warehouse,
    Supplier,
    InventoryItem,
    StockMovement,
}

impl EntityKind {
    /// Human-readable name used in error messages and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Product => "product",
            EntityKind::Warehouse => "warehouse",
            EntityKind::Supplier => "supplier",
            EntityKind::InventoryItem => "inventory item",
            EntityKind::StockMovement => "stock movement",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Behaviour shared by every stored entity.
pub trait Entity: fmt::Debug + Clone + Send + Sync + 'static {
    /// The entity type.
    const KIND: EntityKind;

    /// The entity's identifier.
    fn id(&self) -> EntityId;

    /// Replaces the identifier (used when a fresh id is assigned on create).
    fn set_id(&mut self, id: EntityId);
}

macro_rules! impl_entity {
    ($ty:ty, $kind:expr) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            #[inline]
            fn id(&self) -> EntityId {
                self.id
            }

            #[inline]
            fn set_id(&mut self, id: EntityId) {
                self.id = id;
            }
        }
    };
}

// =============================================================================
// Category
// =============================================================================

/// A product category. `name` is unique across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

impl_entity!(Category, EntityKind::Category);

// =============================================================================
// Product
// =============================================================================

/// A product.
///
/// `sku` is unique and, independently, `name` is unique. `category_id` must
/// reference an existing [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub category_id: EntityId,
    pub price: f64,
    /// Stock Keeping Unit - business identifier.
    pub sku: String,
}

impl_entity!(Product, EntityKind::Product);

// =============================================================================
// Warehouse
// =============================================================================

/// A storage location. `name` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: EntityId,
    pub name: String,
    pub location: String,
}

impl_entity!(Warehouse, EntityKind::Warehouse);

// =============================================================================
// Supplier
// =============================================================================

/// A supplier. `name` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    pub contact_info: String,
}

impl_entity!(Supplier, EntityKind::Supplier);

// =============================================================================
// Inventory Item
// =============================================================================

/// Stock of one product held in one warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: EntityId,
    /// Must reference an existing [`Product`].
    pub product_id: EntityId,
    /// Must reference an existing [`Warehouse`].
    pub warehouse_id: EntityId,
    pub quantity: i32,
    /// Quantity at or below which the item should be reordered.
    pub reorder_level: i32,
    /// Quantity to reorder.
    pub reorder_quantity: i32,
}

impl_entity!(InventoryItem, EntityKind::InventoryItem);

// =============================================================================
// Movement Type
// =============================================================================

/// Direction of a stock movement.
///
/// Persisted as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Addition = 0,
    Removal = 1,
    Transfer = 2,
}

impl MovementType {
    /// Integer discriminant as stored.
    #[inline]
    pub const fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl TryFrom<i32> for MovementType {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MovementType::Addition),
            1 => Ok(MovementType::Removal),
            2 => Ok(MovementType::Transfer),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec![
                    "0 (addition)".to_string(),
                    "1 (removal)".to_string(),
                    "2 (transfer)".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// A recorded change in stock for an inventory item.
///
/// None of the references are checked against storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: EntityId,
    pub inventory_item_id: EntityId,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
    /// Absent for additions.
    pub source_warehouse_id: Option<EntityId>,
    /// Absent for removals.
    pub destination_warehouse_id: Option<EntityId>,
}

impl_entity!(StockMovement, EntityKind::StockMovement);

// =============================================================================
// Unit Tests
// =============================================================================
