//! # Warehouse Repository

use async_trait::async_trait;
use depot_core::{EntityId, Warehouse};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id};
use super::{Attribute, AttributeLookup, EntityStore};
use crate::error::{DbError, DbResult};

const TABLE: &str = "warehouses";
const LOOKUPS: &[Attribute] = &[Attribute::Name];

#[derive(Debug, sqlx::FromRow)]
struct WarehouseRow {
    id: String,
    name: String,
    location: String,
}

impl TryFrom<WarehouseRow> for Warehouse {
    type Error = DbError;

    fn try_from(row: WarehouseRow) -> Result<Self, Self::Error> {
        Ok(Warehouse {
            id: decode_id(TABLE, "id", &row.id)?,
            name: row.name,
            location: row.location,
        })
    }
}

/// Repository for warehouse rows, with a secondary lookup on `name`.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }
}

#[async_trait]
impl EntityStore<Warehouse> for WarehouseRepository {
    async fn insert(&self, warehouse: &Warehouse) -> DbResult<()> {
        debug!(id = %warehouse.id, name = %warehouse.name, "Inserting warehouse");

        sqlx::query("INSERT INTO warehouses (id, name, location) VALUES (?1, ?2, ?3)")
            .bind(warehouse.id.to_string())
            .bind(&warehouse.name)
            .bind(&warehouse.location)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Warehouse>> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            "SELECT id, name, location FROM warehouses WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Warehouse::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, WarehouseRow>("SELECT id, name, location FROM warehouses")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Warehouse::try_from).collect()
    }

    async fn update(&self, warehouse: &Warehouse) -> DbResult<()> {
        debug!(id = %warehouse.id, "Updating warehouse");

        sqlx::query(
            r#"
            INSERT INTO warehouses (id, name, location) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                location = excluded.location
            "#,
        )
        .bind(warehouse.id.to_string())
        .bind(&warehouse.name)
        .bind(&warehouse.location)
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

#[async_trait]
impl AttributeLookup for WarehouseRepository {
    async fn count_by_attribute(&self, attribute: Attribute, value: &str) -> DbResult<i64> {
        let column = support::lookup_column(TABLE, LOOKUPS, attribute)?;
        support::count_where(&self.pool, TABLE, column, value).await
    }

    async fn list_ids_by_attribute(
        &self,
        attribute: Attribute,
        value: &str,
    ) -> DbResult<Vec<EntityId>> {
        let column = support::lookup_column(TABLE, LOOKUPS, attribute)?;
        support::ids_where(&self.pool, TABLE, column, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use depot_core::new_id;

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.warehouses();
        let mut warehouse = Warehouse {
            id: new_id(),
            name: "North".to_string(),
            location: "Oslo".to_string(),
        };

        repo.insert(&warehouse).await.unwrap();
        assert_eq!(repo.count_by_attribute(Attribute::Name, "North").await.unwrap(), 1);

        warehouse.location = "Bergen".to_string();
        repo.update(&warehouse).await.unwrap();
        assert_eq!(
            repo.get_by_id(warehouse.id).await.unwrap(),
            Some(warehouse.clone())
        );

        repo.delete(warehouse.id).await.unwrap();
        assert!(!repo.exists_by_id(warehouse.id).await.unwrap());
    }
}
