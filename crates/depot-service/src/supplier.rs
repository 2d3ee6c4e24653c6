//! # Supplier Service
//!
//! Supplier names are unique. Deletion is unguarded.

use std::sync::Arc;

use depot_core::{new_id, Entity, EntityId, Supplier};
use depot_db::{Attribute, EntityStore, UniqueEntityStore};
use tracing::info;

use crate::checks::{ensure_exists, ensure_unclaimed, ensure_unclaimed_by_others, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const NAME_TAKEN: &str = "supplier with the same name already exists";
const NAME_TAKEN_BY_OTHER: &str = "another supplier with the same name already exists";
const NOT_FOUND: &str = "supplier not found";

/// Rules for suppliers.
#[derive(Clone)]
pub struct SupplierService {
    suppliers: Arc<dyn UniqueEntityStore<Supplier>>,
}

impl SupplierService {
    pub fn new(suppliers: Arc<dyn UniqueEntityStore<Supplier>>) -> Self {
        SupplierService { suppliers }
    }

    pub async fn create(&self, mut supplier: Supplier) -> ServiceResult<Supplier> {
        supplier.set_id(new_id());

        ensure_unclaimed(
            &*self.suppliers,
            &[(Attribute::Name, supplier.name.as_str())],
            NAME_TAKEN,
        )
        .await?;

        self.suppliers
            .insert(&supplier)
            .await
            .map_err(ServiceError::storage("inserting supplier"))?;

        info!(id = %supplier.id, name = %supplier.name, "Supplier created");
        Ok(supplier)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Supplier> {
        fetch(&*self.suppliers, id).await
    }

    pub async fn update(&self, supplier: Supplier) -> ServiceResult<Supplier> {
        ensure_unclaimed_by_others(
            &*self.suppliers,
            &supplier,
            &[(Attribute::Name, supplier.name.as_str())],
            NAME_TAKEN_BY_OTHER,
        )
        .await?;

        ensure_exists::<Supplier, _>(&*self.suppliers, supplier.id, NOT_FOUND).await?;

        self.suppliers
            .update(&supplier)
            .await
            .map_err(ServiceError::storage("updating supplier"))?;

        info!(id = %supplier.id, "Supplier updated");
        Ok(supplier)
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.suppliers
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting supplier"))?;

        info!(id = %id, "Supplier deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Supplier>> {
        fetch_all(&*self.suppliers).await
    }
}
