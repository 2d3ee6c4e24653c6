//! # Stock Movement Repository
//!
//! Stock movement rows. `movement_type` is stored as its integer
//! discriminant; a stored value outside 0..=2 is a decode fault, not a
//! skipped row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depot_core::{EntityId, MovementType, StockMovement};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id, decode_optional_id};
use super::EntityStore;
use crate::error::{DbError, DbResult};

const TABLE: &str = "stock_movements";

const SELECT_COLUMNS: &str = "SELECT id, inventory_item_id, movement_type, quantity, timestamp, \
                              source_warehouse_id, destination_warehouse_id FROM stock_movements";

#[derive(Debug, sqlx::FromRow)]
struct StockMovementRow {
    id: String,
    inventory_item_id: String,
    movement_type: i32,
    quantity: i32,
    timestamp: DateTime<Utc>,
    source_warehouse_id: Option<String>,
    destination_warehouse_id: Option<String>,
}

impl TryFrom<StockMovementRow> for StockMovement {
    type Error = DbError;

    fn try_from(row: StockMovementRow) -> Result<Self, Self::Error> {
        let movement_type = MovementType::try_from(row.movement_type)
            .map_err(|e| DbError::decode(TABLE, "movement_type", e.to_string()))?;

        Ok(StockMovement {
            id: decode_id(TABLE, "id", &row.id)?,
            inventory_item_id: decode_id(TABLE, "inventory_item_id", &row.inventory_item_id)?,
            movement_type,
            quantity: row.quantity,
            timestamp: row.timestamp,
            source_warehouse_id: decode_optional_id(
                TABLE,
                "source_warehouse_id",
                row.source_warehouse_id.as_deref(),
            )?,
            destination_warehouse_id: decode_optional_id(
                TABLE,
                "destination_warehouse_id",
                row.destination_warehouse_id.as_deref(),
            )?,
        })
    }
}

/// Repository for stock movement rows.
#[derive(Debug, Clone)]
pub struct StockMovementRepository {
    pool: SqlitePool,
}

impl StockMovementRepository {
    /// Creates a new StockMovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockMovementRepository { pool }
    }
}

#[async_trait]
impl EntityStore<StockMovement> for StockMovementRepository {
    async fn insert(&self, movement: &StockMovement) -> DbResult<()> {
        debug!(
            id = %movement.id,
            inventory_item_id = %movement.inventory_item_id,
            movement_type = ?movement.movement_type,
            "Inserting stock movement"
        );

        sqlx::query(
            r#"
            INSERT INTO stock_movements
                (id, inventory_item_id, movement_type, quantity, timestamp,
                 source_warehouse_id, destination_warehouse_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(movement.id.to_string())
        .bind(movement.inventory_item_id.to_string())
        .bind(movement.movement_type.as_i32())
        .bind(movement.quantity)
        .bind(movement.timestamp)
        .bind(movement.source_warehouse_id.map(|id| id.to_string()))
        .bind(movement.destination_warehouse_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<StockMovement>> {
        debug!(id = %id, "Getting stock movement by ID");

        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = sqlx::query_as::<_, StockMovementRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(StockMovement::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, StockMovementRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed stock movements");
        rows.into_iter().map(StockMovement::try_from).collect()
    }

    async fn update(&self, movement: &StockMovement) -> DbResult<()> {
        debug!(id = %movement.id, "Updating stock movement");

        sqlx::query(
            r#"
            INSERT INTO stock_movements
                (id, inventory_item_id, movement_type, quantity, timestamp,
                 source_warehouse_id, destination_warehouse_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                inventory_item_id = excluded.inventory_item_id,
                movement_type = excluded.movement_type,
                quantity = excluded.quantity,
                timestamp = excluded.timestamp,
                source_warehouse_id = excluded.source_warehouse_id,
                destination_warehouse_id = excluded.destination_warehouse_id
            "#,
        )
        .bind(movement.id.to_string())
        .bind(movement.inventory_item_id.to_string())
        .bind(movement.movement_type.as_i32())
        .bind(movement.quantity)
        .bind(movement.timestamp)
        .bind(movement.source_warehouse_id.map(|id| id.to_string()))
        .bind(movement.destination_warehouse_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: EntityId) -> DbResult<()> {
        support::delete_by_id(&self.pool, TABLE, id).await
    }

    async fn exists_by_id(&self, id: EntityId) -> DbResult<bool> {
        support::exists(&self.pool, TABLE, id).await
    }
}
