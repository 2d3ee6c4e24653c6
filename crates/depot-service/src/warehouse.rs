//! # Warehouse Service
//!
//! Warehouse names are unique. Deletion is unguarded.

use std::sync::Arc;

use depot_core::{new_id, Entity, EntityId, Warehouse};
use depot_db::{Attribute, EntityStore, UniqueEntityStore};
use tracing::info;

use crate::checks::{ensure_exists, ensure_unclaimed, ensure_unclaimed_by_others, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const NAME_TAKEN: &str = "warehouse with the same name already exists";
const NAME_TAKEN_BY_OTHER: &str = "another warehouse with the same name already exists";
const NOT_FOUND: &str = "warehouse not found";

/// Rules for warehouses.
#[derive(Clone)]
pub struct WarehouseService {
    warehouses: Arc<dyn UniqueEntityStore<Warehouse>>,
}

impl WarehouseService {
    pub fn new(warehouses: Arc<dyn UniqueEntityStore<Warehouse>>) -> Self {
        WarehouseService { warehouses }
    }

    pub async fn create(&self, mut warehouse: Warehouse) -> ServiceResult<Warehouse> {
        warehouse.set_id(new_id());

        ensure_unclaimed(
            &*self.warehouses,
            &[(Attribute::Name, warehouse.name.as_str())],
            NAME_TAKEN,
        )
        .await?;

        self.warehouses
            .insert(&warehouse)
            .await
            .map_err(ServiceError::storage("inserting warehouse"))?;

        info!(id = %warehouse.id, name = %warehouse.name, "Warehouse created");
        Ok(warehouse)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Warehouse> {
        fetch(&*self.warehouses, id).await
    }

    pub async fn update(&self, warehouse: Warehouse) -> ServiceResult<Warehouse> {
        ensure_unclaimed_by_others(
            &*self.warehouses,
            &warehouse,
            &[(Attribute::Name, warehouse.name.as_str())],
            NAME_TAKEN_BY_OTHER,
        )
        .await?;

        ensure_exists::<Warehouse, _>(&*self.warehouses, warehouse.id, NOT_FOUND).await?;

        self.warehouses
            .update(&warehouse)
            .await
            .map_err(ServiceError::storage("updating warehouse"))?;

        info!(id = %warehouse.id, "Warehouse updated");
        Ok(warehouse)
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.warehouses
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting warehouse"))?;

        info!(id = %id, "Warehouse deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Warehouse>> {
        fetch_all(&*self.warehouses).await
    }
}
