//! Test fixtures shared by the service test modules.

use async_trait::async_trait;
use depot_core::{Entity, EntityId};
use depot_db::{Attribute, AttributeLookup, Database, DbConfig, DbResult, EntityStore};
use tokio::sync::Barrier;

use crate::InventoryServices;

/// Fresh in-memory database with every service wired to it.
pub(crate) async fn in_memory() -> (Database, InventoryServices) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let services = InventoryServices::from_database(&db);
    (db, services)
}

/// Store wrapper that parks each `count_by_attribute` caller after its count
/// is taken until `parties` callers have counted. Holds concurrent creates
/// inside the window between uniqueness pre-check and insert.
pub(crate) struct CountGate<S> {
    inner: S,
    barrier: Barrier,
}

impl<S> CountGate<S> {
    pub(crate) fn new(inner: S, parties: usize) -> Self {
        CountGate {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl<T, S> EntityStore<T> for CountGate<S>
where
    T: Entity,
    S: EntityStore<T>,
{
    async fn insert(&self, entity: &T) -> DbResult<()> {
        self.inner.insert(entity).await
    }

    async fn get_by_id(&self, id: EntityId) -> DbResult<Option<T>> {
        self.inner.get_by_id(id).await
    }

    async fn list_all(&self) -> DbResult<Vec<T>> {
        self.inner.list_all().await
    }

    async fn update(&self, entity: &T) -> DbResult<()> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: EntityId) -> DbResult<()> {
        self.inner.delete(id).await
    }

    async fn exists_by_id(&self, id: EntityId) -> DbResult<bool> {
        self.inner.exists_by_id(id).await
    }
}

#[async_trait]
impl<S> AttributeLookup for CountGate<S>
where
    S: AttributeLookup,
{
    async fn count_by_attribute(&self, attribute: Attribute, value: &str) -> DbResult<i64> {
        let count = self.inner.count_by_attribute(attribute, value).await?;
        self.barrier.wait().await;
        Ok(count)
    }

    async fn list_ids_by_attribute(
        &self,
        attribute: Attribute,
        value: &str,
    ) -> DbResult<Vec<EntityId>> {
        self.inner.list_ids_by_attribute(attribute, value).await
    }
}
