//! Pre-checks shared by the entity services.
//!
//! Every helper is generic over `?Sized` stores so it accepts both concrete
//! repositories and the `dyn` stores the services hold.

use depot_core::{Entity, EntityId};
use depot_db::{Attribute, AttributeLookup, EntityStore};

use crate::error::{ServiceError, ServiceResult};

/// Fails with `AlreadyExists(conflict)` if any `(attribute, value)` claim
/// matches a stored row. Claims are checked in order and the first hit wins.
pub(crate) async fn ensure_unclaimed<S>(
    store: &S,
    claims: &[(Attribute, &str)],
    conflict: &str,
) -> ServiceResult<()>
where
    S: AttributeLookup + ?Sized,
{
    for (attribute, value) in claims {
        let count = store
            .count_by_attribute(*attribute, value)
            .await
            .map_err(ServiceError::storage(format!("counting rows by {attribute}")))?;

        if count > 0 {
            return Err(ServiceError::already_exists(conflict));
        }
    }
    Ok(())
}

/// Like [`ensure_unclaimed`], but rows belonging to `own` do not count.
/// Used on update so an unchanged name never conflicts with itself.
pub(crate) async fn ensure_unclaimed_by_others<T, S>(
    store: &S,
    own: &T,
    claims: &[(Attribute, &str)],
    conflict: &str,
) -> ServiceResult<()>
where
    T: Entity,
    S: AttributeLookup + ?Sized,
{
    let own_id = own.id();
    for (attribute, value) in claims {
        let ids = store
            .list_ids_by_attribute(*attribute, value)
            .await
            .map_err(ServiceError::storage(format!("listing rows by {attribute}")))?;

        if ids.iter().any(|id| *id != own_id) {
            return Err(ServiceError::already_exists(conflict));
        }
    }
    Ok(())
}

/// Fails with `NotFound(missing)` unless a row with `id` exists.
pub(crate) async fn ensure_exists<T, S>(store: &S, id: EntityId, missing: &str) -> ServiceResult<()>
where
    T: Entity,
    S: EntityStore<T> + ?Sized,
{
    let found = store
        .exists_by_id(id)
        .await
        .map_err(ServiceError::storage(format!("checking {} {id} exists", T::KIND)))?;

    if found {
        Ok(())
    } else {
        Err(ServiceError::not_found(missing))
    }
}

/// Loads an entity, mapping absence to `"<kind> not found"`.
pub(crate) async fn fetch<T, S>(store: &S, id: EntityId) -> ServiceResult<T>
where
    T: Entity,
    S: EntityStore<T> + ?Sized,
{
    store
        .get_by_id(id)
        .await
        .map_err(ServiceError::storage(format!("loading {} {id}", T::KIND)))?
        .ok_or_else(|| ServiceError::not_found(format!("{} not found", T::KIND)))
}

/// Loads every entity of a kind.
pub(crate) async fn fetch_all<T, S>(store: &S) -> ServiceResult<Vec<T>>
where
    T: Entity,
    S: EntityStore<T> + ?Sized,
{
    store
        .list_all()
        .await
        .map_err(ServiceError::storage(format!("listing {}", T::KIND)))
}
