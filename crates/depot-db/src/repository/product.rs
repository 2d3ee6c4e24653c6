//! # Product Repository
//!
//! Product rows, with secondary lookups on `sku` and `name`.
//!
//! `category_id` is stored as plain text. Nothing at this layer checks that
//! it names an existing category; depot-service does that before writing.

use async_trait::async_trait;
use depot_core::{EntityId, Product};
use sqlx::SqlitePool;
use tracing::debug;

use super::support::{self, decode_id};
use super::{Attribute, AttributeLookup, EntityStore};
use crate::error::{DbError, DbResult};

const TABLE: &str = "products";
const LOOKUPS: &[Attribute] = &[Attribute::Sku, Attribute::Name];

const SELECT_COLUMNS: &str = "SELECT id, name, description, category_id, price, sku FROM products";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    category_id: String,
    price: f64,
    sku: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: decode_id(TABLE, "id", &row.id)?,
            name: row.name,
            description: row.description,
            category_id: decode_id(TABLE, "category_id", &row.category_id)?,
            price: row.price,
            sku: row.sku,
        })
    }
}

/// Repository for product rows.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let taken = repo.count_by_attribute(Attribute::Sku, "HAM-001").await? > 0;
/// let product = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }
}

#[async_trait]
impl EntityStore<Product> for ProductRepository {
    async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, category_id, price, sku)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id.to_string())
        .bind(product.price)
        .bind(&product.sku)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<Product>> {
        debug!(id = %id, "Getting product by ID");

        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed products");
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, category_id, price, sku)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                category_id = excluded.category_id,
                price = excluded.price,
                sku = excluded.sku
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id.to_string())
        .bind(product.price)
        .bind(&product.sku)
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
impl AttributeLookup for ProductRepository {
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
