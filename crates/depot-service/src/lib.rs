//! # depot-service: Consistency Rules for Depot
//!
//! Enforces uniqueness and referential rules that storage does not. Each
//! mutation pre-checks through the depot-db capability traits, then writes.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Entity          Unique by      References checked      Delete guard    │
//! │  ─────────────   ────────────   ─────────────────────   ────────────    │
//! │  Category        name           -                       exists          │
//! │  Product         sku, name      category                -               │
//! │  Warehouse       name           -                       -               │
//! │  Supplier        name           -                       -               │
//! │  InventoryItem   -              product, warehouse      exists          │
//! │  StockMovement   -              -                       -               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every update also fails with `NotFound` when the target row is absent,
//! after the uniqueness check and before the reference checks.
//!
//! ## Concurrency
//!
//! Check-then-write is not atomic and no lock is held. Two concurrent creates
//! with the same name can both succeed. Sequential duplicates are always
//! rejected.

pub mod category;
pub mod error;
pub mod inventory_item;
pub mod product;
pub mod stock_movement;
pub mod supplier;
pub mod warehouse;

mod checks;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use depot_db::Database;

pub use category::CategoryService;
pub use error::{ServiceError, ServiceResult};
pub use inventory_item::InventoryItemService;
pub use product::ProductService;
pub use stock_movement::StockMovementService;
pub use supplier::SupplierService;
pub use warehouse::WarehouseService;

/// Every entity service, wired to one storage handle.
#[derive(Clone)]
pub struct InventoryServices {
    pub categories: CategoryService,
    pub products: ProductService,
    pub warehouses: WarehouseService,
    pub suppliers: SupplierService,
    pub inventory_items: InventoryItemService,
    pub stock_movements: StockMovementService,
}

impl InventoryServices {
    /// Builds the services over the repositories of `db`.
    pub fn from_database(db: &Database) -> Self {
        InventoryServices {
            categories: CategoryService::new(Arc::new(db.categories())),
            products: ProductService::new(Arc::new(db.products()), Arc::new(db.categories())),
            warehouses: WarehouseService::new(Arc::new(db.warehouses())),
            suppliers: SupplierService::new(Arc::new(db.suppliers())),
            inventory_items: InventoryItemService::new(
                Arc::new(db.inventory_items()),
                Arc::new(db.products()),
                Arc::new(db.warehouses()),
            ),
            stock_movements: StockMovementService::new(Arc::new(db.stock_movements())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::in_memory;
    use depot_core::{Category, EntityId, InventoryItem, Product, Warehouse};

    #[tokio::test]
    async fn test_catalogue_scenario() {
        let (_db, services) = in_memory().await;

        let electronics = services
            .categories
            .create(Category {
                id: EntityId::nil(),
                name: "Electronics".to_string(),
                description: "Gadgets".to_string(),
            })
            .await
            .unwrap();

        let widget = services
            .products
            .create(Product {
                id: EntityId::nil(),
                name: "Widget".to_string(),
                description: "A widget".to_string(),
                category_id: electronics.id,
                price: 9.99,
                sku: "W-1".to_string(),
            })
            .await
            .unwrap();

        let duplicate_name = services
            .products
            .create(Product {
                id: EntityId::nil(),
                name: "Widget".to_string(),
                description: "Another widget".to_string(),
                category_id: electronics.id,
                price: 19.99,
                sku: "W-2".to_string(),
            })
            .await;
        assert!(matches!(duplicate_name, Err(ServiceError::AlreadyExists(_))));

        let unknown_warehouse = services
            .inventory_items
            .create(InventoryItem {
                id: EntityId::nil(),
                product_id: widget.id,
                warehouse_id: depot_core::new_id(),
                quantity: 10,
                reorder_level: 2,
                reorder_quantity: 5,
            })
            .await;
        assert!(matches!(unknown_warehouse, Err(ServiceError::NotFound(_))));
        assert!(services.inventory_items.list().await.unwrap().is_empty());

        assert_eq!(services.categories.list().await.unwrap(), vec![electronics]);
        assert_eq!(services.products.list().await.unwrap(), vec![widget]);
        let warehouses: Vec<Warehouse> = services.warehouses.list().await.unwrap();
        assert!(warehouses.is_empty());
    }
}
