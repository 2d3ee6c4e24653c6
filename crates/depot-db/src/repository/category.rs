//! # Category Repository
//!
//! Category rows, with a secondary lookup on `name`.

use async_trait::async_trait;
use depot_core::{Category, EntityId};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id};
use super::{Attribute, AttributeLookup, EntityStore};
use crate::error::DbResult;

const TABLE: &str = "categories";
const LOOKUPS: &[Attribute] = &[Attribute::Name];

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = crate::error::DbError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: decode_id(TABLE, "id", &row.id)?,
            name: row.name,
            description: row.description,
        })
    }
}

/// Repository for category rows.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }
}

#[async_trait]
impl EntityStore<Category> for CategoryRepository {
    async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query("INSERT INTO categories (id, name, description) VALUES (?1, ?2, ?3)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Category>> {
        debug!(id = %id, "Getting category by ID");

        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Category::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name, description FROM categories")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed categories");
        rows.into_iter().map(Category::try_from).collect()
    }

    async fn update(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, "Updating category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(&category.description)
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
impl AttributeLookup for CategoryRepository {
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

// =============================================================================
// Unit Tests
// =============================================================================
