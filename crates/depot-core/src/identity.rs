//! # Identity Assignment
//!
//! Every entity gets a fresh identifier before the first pre-check runs.
//! Identifiers are random v4 UUIDs generated locally: there is no central
//! allocator and nothing to synchronize, so concurrent callers never
//! coordinate.

use uuid::Uuid;

/// Identifier type shared by every entity.
pub type EntityId = Uuid;

/// Generates a new, globally unique entity identifier.
///
/// ## Example
/// ```rust
/// use depot_core::identity::new_id;
///
/// assert_ne!(new_id(), new_id());
/// ```
pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_is_v4() {
        assert_eq!(new_id().get_version_num(), 4);
    }

    #[test]
    fn test_new_ids_do_not_collide() {
        let ids: HashSet<EntityId> = (0..10_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_new_id_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..500).map(|_| new_id()).collect::<Vec<_>>()))
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 4_000);
    }
}
