//! # Inventory Item Repository
//!
//! Inventory item rows. No secondary lookups; the `(product_id,
//! warehouse_id)` pair is not constrained and may repeat.

use async_trait::async_trait;
use depot_core::{EntityId, InventoryItem};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id};
use super::EntityStore;
use crate::error::{DbError, DbResult};

const TABLE: &str = "inventory_items";

const SELECT_COLUMNS: &str = "SELECT id, product_id, warehouse_id, quantity, reorder_level, \
                              reorder_quantity FROM inventory_items";

#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRow {
    id: String,
    product_id: String,
    warehouse_id: String,
    quantity: i32,
    reorder_level: i32,
    reorder_quantity: i32,
}

impl TryFrom<InventoryItemRow> for InventoryItem {
    type Error = DbError;

    fn try_from(row: InventoryItemRow) -> Result<Self, Self::Error> {
        Ok(InventoryItem {
            id: decode_id(TABLE, "id", &row.id)?,
            product_id: decode_id(TABLE, "product_id", &row.product_id)?,
            warehouse_id: decode_id(TABLE, "warehouse_id", &row.warehouse_id)?,
            quantity: row.quantity,
            reorder_level: row.reorder_level,
            reorder_quantity: row.reorder_quantity,
        })
    }
}

/// Repository for inventory item rows.
#[derive(Debug, Clone)]
pub struct InventoryItemRepository {
    pool: SqlitePool,
}

impl InventoryItemRepository {
    /// Creates a new InventoryItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryItemRepository { pool }
    }
}

#[async_trait]
impl EntityStore<InventoryItem> for InventoryItemRepository {
    async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(
            id = %item.id,
            product_id = %item.product_id,
            warehouse_id = %item.warehouse_id,
            "Inserting inventory item"
        );

        sqlx::query(
            r#"
            INSERT INTO inventory_items
                (id, product_id, warehouse_id, quantity, reorder_level, reorder_quantity)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.product_id.to_string())
        .bind(item.warehouse_id.to_string())
        .bind(item.quantity)
        .bind(item.reorder_level)
        .bind(item.reorder_quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<InventoryItem>> {
        debug!(id = %id, "Getting inventory item by ID");

        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = sqlx::query_as::<_, InventoryItemRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(InventoryItem::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryItemRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed inventory items");
        rows.into_iter().map(InventoryItem::try_from).collect()
    }

    async fn update(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, quantity = item.quantity, "Updating inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items
                (id, product_id, warehouse_id, quantity, reorder_level, reorder_quantity)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                product_id = excluded.product_id,
                warehouse_id = excluded.warehouse_id,
                quantity = excluded.quantity,
                reorder_level = excluded.reorder_level,
                reorder_quantity = excluded.reorder_quantity
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.product_id.to_string())
        .bind(item.warehouse_id.to_string())
        .bind(item.quantity)
        .bind(item.reorder_level)
        .bind(item.reorder_quantity)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use depot_core::new_id;

    fn item() -> InventoryItem {
        InventoryItem {
            id: new_id(),
            product_id: new_id(),
            warehouse_id: new_id(),
            quantity: 10,
            reorder_level: 2,
            reorder_quantity: 20,
        }
    }

    #[tokio::test]
    async fn test_negative_quantities_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory_items();
        let mut item = item();
        item.quantity = -5;
        item.reorder_level = -1;

        repo.insert(&item).await.unwrap();

        assert_eq!(repo.get_by_id(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_duplicate_product_warehouse_pairs_allowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory_items();
        let first = item();
        let mut second = item();
        second.product_id = first.product_id;
        second.warehouse_id = first.warehouse_id;

        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory_items();
        let mut item = item();
        repo.insert(&item).await.unwrap();

        item.quantity = 42;
        repo.update(&item).await.unwrap();
        assert_eq!(repo.get_by_id(item.id).await.unwrap().unwrap().quantity, 42);

        repo.delete(item.id).await.unwrap();
        assert!(!repo.exists_by_id(item.id).await.unwrap());
    }
}
