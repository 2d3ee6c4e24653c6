//! # Inventory Item Service
//!
//! An inventory item must reference an existing product and an existing
//! warehouse. The product is checked first. Nothing limits how many items
//! share a `(product, warehouse)` pair, and quantities are not range checked.

use std::sync::Arc;

use depot_core::{new_id, Entity, EntityId, InventoryItem, Product, Warehouse};
use depot_db::EntityStore;
use tracing::info;

use crate::checks::{ensure_exists, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const PRODUCT_MISSING: &str = "product not found";
const WAREHOUSE_MISSING: &str = "warehouse not found";
const NOT_FOUND: &str = "inventory item not found";

/// Rules for inventory items.
#[derive(Clone)]
pub struct InventoryItemService {
    items: Arc<dyn EntityStore<InventoryItem>>,
    products: Arc<dyn EntityStore<Product>>,
    warehouses: Arc<dyn EntityStore<Warehouse>>,
}

impl InventoryItemService {
    pub fn new(
        items: Arc<dyn EntityStore<InventoryItem>>,
        products: Arc<dyn EntityStore<Product>>,
        warehouses: Arc<dyn EntityStore<Warehouse>>,
    ) -> Self {
        InventoryItemService {
            items,
            products,
            warehouses,
        }
    }

    async fn ensure_references(&self, item: &InventoryItem) -> ServiceResult<()> {
        ensure_exists::<Product, _>(&*self.products, item.product_id, PRODUCT_MISSING).await?;
        ensure_exists::<Warehouse, _>(&*self.warehouses, item.warehouse_id, WAREHOUSE_MISSING)
            .await
    }

    pub async fn create(&self, mut item: InventoryItem) -> ServiceResult<InventoryItem> {
        item.set_id(new_id());

        self.ensure_references(&item).await?;

        self.items
            .insert(&item)
            .await
            .map_err(ServiceError::storage("inserting inventory item"))?;

        info!(
            id = %item.id,
            product_id = %item.product_id,
            warehouse_id = %item.warehouse_id,
            quantity = item.quantity,
            "Inventory item created"
        );
        Ok(item)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<InventoryItem> {
        fetch(&*self.items, id).await
    }

    pub async fn update(&self, item: InventoryItem) -> ServiceResult<InventoryItem> {
        ensure_exists::<InventoryItem, _>(&*self.items, item.id, NOT_FOUND).await?;

        self.ensure_references(&item).await?;

        self.items
            .update(&item)
            .await
            .map_err(ServiceError::storage("updating inventory item"))?;

        info!(id = %item.id, quantity = item.quantity, "Inventory item updated");
        Ok(item)
    }

    /// Fails with `NotFound` for an unknown id.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        ensure_exists::<InventoryItem, _>(&*self.items, id, NOT_FOUND).await?;

        self.items
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting inventory item"))?;

        info!(id = %id, "Inventory item deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<InventoryItem>> {
        fetch_all(&*self.items).await
    }
}
