//! # Stock Movement Service
//!
//! Stock movements are recorded as given. The inventory item and warehouse
//! references are not checked, and recording a movement does not change any
//! inventory item quantity.

use std::sync::Arc;

use depot_core::{new_id, Entity, EntityId, StockMovement};
use depot_db::EntityStore;
use tracing::info;

use crate::checks::{ensure_exists, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const NOT_FOUND: &str = "stock movement not found";

/// Rules for stock movements.
#[derive(Clone)]
pub struct StockMovementService {
    movements: Arc<dyn EntityStore<StockMovement>>,
}

impl StockMovementService {
    pub fn new(movements: Arc<dyn EntityStore<StockMovement>>) -> Self {
        StockMovementService { movements }
    }

    pub async fn create(&self, mut movement: StockMovement) -> ServiceResult<StockMovement> {
        movement.set_id(new_id());

        self.movements
            .insert(&movement)
            .await
            .map_err(ServiceError::storage("inserting stock movement"))?;

        info!(
            id = %movement.id,
            inventory_item_id = %movement.inventory_item_id,
            movement_type = ?movement.movement_type,
            quantity = movement.quantity,
            "Stock movement recorded"
        );
        Ok(movement)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<StockMovement> {
        fetch(&*self.movements, id).await
    }

    /// Replaces a stored movement. The target must exist.
    pub async fn update(&self, movement: StockMovement) -> ServiceResult<StockMovement> {
        ensure_exists::<StockMovement, _>(&*self.movements, movement.id, NOT_FOUND).await?;

        self.movements
            .update(&movement)
            .await
            .map_err(ServiceError::storage("updating stock movement"))?;

        info!(id = %movement.id, "Stock movement updated");
        Ok(movement)
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.movements
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting stock movement"))?;

        info!(id = %id, "Stock movement deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<StockMovement>> {
        fetch_all(&*self.movements).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::in_memory;
    use chrono::{TimeZone, Utc};
    use depot_core::MovementType;

    fn removal() -> StockMovement {
        StockMovement {
            id: EntityId::nil(),
            inventory_item_id: new_id(),
            movement_type: MovementType::Removal,
            quantity: 4,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            source_warehouse_id: Some(new_id()),
            destination_warehouse_id: None,
        }
    }

    #[tokio::test]
    async fn test_references_are_not_validated() {
        let (_db, services) = in_memory().await;

        let created = services.stock_movements.create(removal()).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(services.stock_movements.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_requires_existing_movement() {
        let (_db, services) = in_memory().await;
        let mut created = services.stock_movements.create(removal()).await.unwrap();

        created.quantity = 6;
        services.stock_movements.update(created.clone()).await.unwrap();
        assert_eq!(services.stock_movements.list().await.unwrap(), vec![created]);

        let mut ghost = removal();
        ghost.id = new_id();
        assert!(matches!(
            services.stock_movements.update(ghost).await,
            Err(ServiceError::NotFound(ref m)) if m == NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_db, services) = in_memory().await;
        let created = services.stock_movements.create(removal()).await.unwrap();

        services.stock_movements.delete(created.id).await.unwrap();
        services.stock_movements.delete(created.id).await.unwrap();

        assert!(matches!(
            services.stock_movements.get(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
