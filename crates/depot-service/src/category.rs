//! # Category Service
//!
//! Category names are unique. Deleting checks existence first.

use std::sync::Arc;

use depot_core::{new_id, Category, Entity, EntityId};
use depot_db::{Attribute, EntityStore, UniqueEntityStore};
use tracing::info;

use crate::checks::{ensure_exists, ensure_unclaimed, ensure_unclaimed_by_others, fetch, fetch_all};
use crate::error::{ServiceError, ServiceResult};

const NAME_TAKEN: &str = "category with the same name already exists";
const NAME_TAKEN_BY_OTHER: &str = "another category with the same name already exists";
const NOT_FOUND: &str = "category not found";

/// Rules for categories.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn UniqueEntityStore<Category>>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn UniqueEntityStore<Category>>) -> Self {
        CategoryService { categories }
    }

    /// Creates a category under a fresh id. Any id on `category` is ignored.
    pub async fn create(&self, mut category: Category) -> ServiceResult<Category> {
        category.set_id(new_id());

        ensure_unclaimed(
            &*self.categories,
            &[(Attribute::Name, category.name.as_str())],
            NAME_TAKEN,
        )
        .await?;

        self.categories
            .insert(&category)
            .await
            .map_err(ServiceError::storage("inserting category"))?;

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Category> {
        fetch(&*self.categories, id).await
    }

    /// Replaces a stored category. The name may stay the same.
    pub async fn update(&self, category: Category) -> ServiceResult<Category> {
        ensure_unclaimed_by_others(
            &*self.categories,
            &category,
            &[(Attribute::Name, category.name.as_str())],
            NAME_TAKEN_BY_OTHER,
        )
        .await?;

        ensure_exists::<Category, _>(&*self.categories, category.id, NOT_FOUND).await?;

        self.categories
            .update(&category)
            .await
            .map_err(ServiceError::storage("updating category"))?;

        info!(id = %category.id, "Category updated");
        Ok(category)
    }

    /// Deletes a category. Products referring to it are left untouched.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        ensure_exists::<Category, _>(&*self.categories, id, NOT_FOUND).await?;

        self.categories
            .delete(id)
            .await
            .map_err(ServiceError::storage("deleting category"))?;

        info!(id = %id, "Category deleted");
        Ok(())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        fetch_all(&*self.categories).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{in_memory, CountGate};
    use depot_db::DbError;

    fn named(name: &str) -> Category {
        Category {
            id: EntityId::nil(),
            name: name.to_string(),
            description: format!("{name} things"),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id_and_round_trips() {
        let (_db, services) = in_memory().await;

        let created = services.categories.create(named("Tools")).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(services.categories.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_sequential_duplicate_name_rejected() {
        let (_db, services) = in_memory().await;
        services.categories.create(named("Tools")).await.unwrap();

        let err = services.categories.create(named("Tools")).await.unwrap_err();

        assert!(matches!(err, ServiceError::AlreadyExists(ref m) if m == NAME_TAKEN));
        assert_eq!(services.categories.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_can_both_commit() {
        let (db, _services) = in_memory().await;
        let gate = Arc::new(CountGate::new(db.categories(), 2));
        let service = CategoryService::new(gate);

        let (a, b) = tokio::join!(
            service.create(named("Tools")),
            service.create(named("Tools"))
        );

        // Both passed the uniqueness pre-check before either wrote.
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeping_name_does_not_conflict_with_itself() {
        let (_db, services) = in_memory().await;
        let mut created = services.categories.create(named("Tools")).await.unwrap();

        created.description = "Updated".to_string();
        let updated = services.categories.update(created.clone()).await.unwrap();

        assert_eq!(updated, created);
        assert_eq!(services.categories.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_to_another_categorys_name_rejected() {
        let (_db, services) = in_memory().await;
        services.categories.create(named("Tools")).await.unwrap();
        let mut garden = services.categories.create(named("Garden")).await.unwrap();

        garden.name = "Tools".to_string();
        let err = services.categories.update(garden).await.unwrap_err();

        assert!(matches!(err, ServiceError::AlreadyExists(ref m) if m == NAME_TAKEN_BY_OTHER));
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let (_db, services) = in_memory().await;
        let mut ghost = named("Ghost");
        ghost.id = new_id();

        let err = services.categories.update(ghost.clone()).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == NOT_FOUND));
        // Nothing was upserted.
        assert!(services.categories.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_guards_existence() {
        let (_db, services) = in_memory().await;
        let created = services.categories.create(named("Tools")).await.unwrap();

        services.categories.delete(created.id).await.unwrap();

        assert!(matches!(
            services.categories.delete(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            services.categories.get(created.id).await,
            Err(ServiceError::NotFound(ref m)) if m == NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_storage_fault_is_internal_not_not_found() {
        let (db, services) = in_memory().await;
        db.close().await;

        let err = services.categories.delete(new_id()).await.unwrap_err();

        match err {
            ServiceError::Internal { source, .. } => {
                assert!(matches!(source, DbError::ConnectionFailed(_)))
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
