//! # Product Service
//!
//! Products are unique by SKU and by name, and must reference an existing
//! category.
//!
//! ## Create
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  1. assign fresh id                                                  │
//! │  2. count(sku) > 0 || count(name) > 0   → AlreadyExists              │
//! │  3. !exists(category_id)                → NotFound                   │
//! │  4. insert                                                           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletion is unguarded: inventory items referring to a deleted product
//! keep their dangling `product_id`.

use std::sync::Arc;

use depot_core::validation::validate_price;
use depot_core::{new_id, Category, Entity, EntityId, Product};
use depot_db::{Attribute, EntityStore, UniqueEntityStore};
use tracing::info;

use crate::checks::{ensure_exists, ensure_unclaimed, ensure_unclaimed_by_others, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const SKU_OR_NAME_TAKEN: &str = "product with the same SKU or name already exists";
const SKU_OR_NAME_TAKEN_BY_OTHER: &str = "another product with the same SKU or name already exists";
const CATEGORY_MISSING: &str = "category with the provided ID does not exist";
const NOT_FOUND: &str = "product not found";

/// Rules for products.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn UniqueEntityStore<Product>>,
    categories: Arc<dyn EntityStore<Category>>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn UniqueEntityStore<Product>>,
        categories: Arc<dyn EntityStore<Category>>,
    ) -> Self {
        ProductService {
            products,
            categories,
        }
    }

    /// Creates a product under a fresh id.
    pub async fn create(&self, mut product: Product) -> ServiceResult<Product> {
        validate_price(product.price)?;
        product.set_id(new_id());

        ensure_unclaimed(
            &*self.products,
            &[
                (Attribute::Sku, product.sku.as_str()),
                (Attribute::Name, product.name.as_str()),
            ],
            SKU_OR_NAME_TAKEN,
        )
        .await?;

        ensure_exists::<Category, _>(&*self.categories, product.category_id, CATEGORY_MISSING)
            .await?;

        self.products
            .insert(&product)
            .await
            .map_err(ServiceError::storage("inserting product"))?;

        info!(id = %product.id, sku = %product.sku, "Product created");
        Ok(product)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Product> {
        fetch(&*self.products, id).await
    }

    /// Replaces a stored product. Re-checks the category since it may have
    /// changed.
    pub async fn update(&self, product: Product) -> ServiceResult<Product> {
        validate_price(product.price)?;

        ensure_unclaimed_by_others(
            &*self.products,
            &product,
            &[
                (Attribute::Sku, product.sku.as_str()),
                (Attribute::Name, product.name.as_str()),
            ],
            SKU_OR_NAME_TAKEN_BY_OTHER,
        )
        .await?;

        ensure_exists::<Product, _>(&*self.products, product.id, NOT_FOUND).await?;

        ensure_exists::<Category, _>(&*self.categories, product.category_id, CATEGORY_MISSING)
            .await?;

        self.products
            .update(&product)
            .await
            .map_err(ServiceError::storage("updating product"))?;

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Idempotent: deleting an unknown id succeeds.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.products
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting product"))?;

        info!(id = %id, "Product deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        fetch_all(&*self.products).await
    }
}
