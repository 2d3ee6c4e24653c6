//! # Supplier Repository

use async_trait::async_trait;
use depot_core::{EntityId, Supplier};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id};
use super::{Attribute, AttributeLookup, EntityStore};
use crate::error::{DbError, DbResult};

const TABLE: &str = "suppliers";
const LOOKUPS: &[Attribute] = &[Attribute::Name];

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: String,
    name: String,
    contact_info: String,
}

impl TryFrom<SupplierRow> for Supplier {
    type Error = DbError;

    fn try_from(row: SupplierRow) -> Result<Self, Self::Error> {
        Ok(Supplier {
            id: decode_id(TABLE, "id", &row.id)?,
            name: row.name,
            contact_info: row.contact_info,
        })
    }
}

/// Repository for supplier rows, with a secondary lookup on `name`.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }
}

#[async_trait]
impl EntityStore<Supplier> for SupplierRepository {
    async fn insert(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query("INSERT INTO suppliers (id, name, contact_info) VALUES (?1, ?2, ?3)")
            .bind(supplier.id.to_string())
            .bind(&supplier.name)
            .bind(&supplier.contact_info)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Supplier>> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, contact_info FROM suppliers WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Supplier::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<Supplier>> {
        let rows =
            sqlx::query_as::<_, SupplierRow>("SELECT id, name, contact_info FROM suppliers")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Supplier::try_from).collect()
    }

    async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = %supplier.id, "Updating supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, contact_info) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                contact_info = excluded.contact_info
            "#,
        )
        .bind(supplier.id.to_string())
        .bind(&supplier.name)
        .bind(&supplier.contact_info)
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
impl AttributeLookup for SupplierRepository {
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
