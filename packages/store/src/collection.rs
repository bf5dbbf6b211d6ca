//! # Entity store: the ordered, id-unique record list
//!
//! [`EntityStore`] is the in-memory authority for one resource during a
//! session. Insertion order is display order, and no two entities share an id:
//! every mutating method checks the invariant and reports a
//! [`ResourceError`] instead of breaking it.
//!
//! Mutation from async code goes through [`StoreAccess`]. The mutator only
//! touches the store inside short synchronous closures, never across an
//! `.await`, so the same code can drive a plain `EntityStore` in tests and a
//! reactive signal in the UI.

use std::collections::BTreeSet;

use tracing::warn;

use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;

/// Ordered list of entities with unique ids.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityStore<E> {
    entities: Vec<E>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list, keeping the first occurrence of each id.
    pub fn from_entities(entities: Vec<E>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            if let Err(err) = store.insert(entity) {
                warn!(resource = E::RESOURCE, "dropping entity: {err}");
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entities
    }

    pub fn into_vec(self) -> Vec<E> {
        self.entities
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.position(id).map(|i| &self.entities[i])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.position(id).is_some()
    }

    /// Next free integer id: one past the largest integer id, or 1.
    ///
    /// Once `i64::MAX` is taken the smallest unused positive id is handed out
    /// instead.
    pub fn next_id(&self) -> EntityId {
        let taken: BTreeSet<i64> = self.entities.iter().filter_map(|e| e.id().as_int()).collect();
        let next = match taken.last() {
            None => 1,
            Some(&max) => max
                .checked_add(1)
                .unwrap_or_else(|| (1..).find(|n| !taken.contains(n)).unwrap_or(0)),
        };
        EntityId::Int(next)
    }

    /// Append `entity` at the end.
    pub fn insert(&mut self, entity: E) -> Result<(), ResourceError> {
        if self.contains(entity.id()) {
            return Err(ResourceError::DuplicateId(entity.id().clone()));
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Replace the entity with the same id, in place. Returns the old value.
    pub fn replace(&mut self, entity: E) -> Result<E, ResourceError> {
        let i = self
            .position(entity.id())
            .ok_or_else(|| ResourceError::NotFound(entity.id().clone()))?;
        Ok(std::mem::replace(&mut self.entities[i], entity))
    }

    /// Put `entity` where `id` currently sits, even if its id differs.
    pub fn swap(&mut self, id: &EntityId, entity: E) -> Result<E, ResourceError> {
        let i = self
            .position(id)
            .ok_or_else(|| ResourceError::NotFound(id.clone()))?;
        if entity.id() != id && self.contains(entity.id()) {
            return Err(ResourceError::DuplicateId(entity.id().clone()));
        }
        Ok(std::mem::replace(&mut self.entities[i], entity))
    }

    /// Replace the entity with the same id in place, or append it.
    /// Returns the entity it displaced.
    pub fn upsert(&mut self, entity: E) -> Option<E> {
        match self.position(entity.id()) {
            Some(i) => Some(std::mem::replace(&mut self.entities[i], entity)),
            None => {
                self.entities.push(entity);
                None
            }
        }
    }

    /// Settle a provisional entry with the entity the server confirmed.
    ///
    /// The confirmed entity takes the provisional slot, unless an entry with
    /// its id is already present: then that entry is overwritten and the
    /// provisional one dropped, since the server's record is authoritative.
    pub fn settle(&mut self, provisional: &EntityId, entity: E) -> Result<(), ResourceError> {
        if entity.id() != provisional && self.contains(entity.id()) {
            self.remove(provisional)?;
            self.replace(entity)?;
        } else {
            self.swap(provisional, entity)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: &EntityId) -> Result<E, ResourceError> {
        let i = self
            .position(id)
            .ok_or_else(|| ResourceError::NotFound(id.clone()))?;
        Ok(self.entities.remove(i))
    }
}

impl<'a, E> IntoIterator for &'a EntityStore<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Short-lived mutable access to a store.
pub trait StoreAccess<E: Entity> {
    fn with_store<T>(&mut self, f: impl FnOnce(&mut EntityStore<E>) -> T) -> T;

    fn snapshot(&mut self) -> EntityStore<E> {
        self.with_store(|s| s.clone())
    }

    fn restore(&mut self, snapshot: EntityStore<E>) {
        self.with_store(|s| *s = snapshot);
    }
}

impl<E: Entity> StoreAccess<E> for EntityStore<E> {
    fn with_store<T>(&mut self, f: impl FnOnce(&mut EntityStore<E>) -> T) -> T {
        f(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Permission;

    fn perms(ids: &[i64]) -> EntityStore<Permission> {
        EntityStore::from_entities(
            ids.iter()
                .map(|&id| Permission::new(id, &format!("p{id}"), &format!("c{id}")))
                .collect(),
        )
    }

    #[test]
    fn test_from_entities_drops_duplicates() {
        let store = EntityStore::from_entities(vec![
            Permission::new(1, "a", "a"),
            Permission::new(1, "b", "b"),
            Permission::new(2, "c", "c"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&EntityId::Int(1)).unwrap().name, "a");
    }

    #[test]
    fn test_next_id() {
        assert_eq!(perms(&[]).next_id(), EntityId::Int(1));
        assert_eq!(perms(&[3, 1, 7]).next_id(), EntityId::Int(8));

        let mut store = perms(&[2]);
        store.insert(Permission::new("x", "x", "x")).unwrap();
        assert_eq!(store.next_id(), EntityId::Int(3));
    }

    #[test]
    fn test_next_id_after_max_int() {
        let store = perms(&[1, i64::MAX, 3]);
        assert_eq!(store.next_id(), EntityId::Int(2));
        assert_eq!(perms(&[i64::MAX]).next_id(), EntityId::Int(1));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut store = perms(&[1]);
        let err = store.insert(Permission::new(1, "dup", "dup")).unwrap_err();
        assert!(matches!(err, ResourceError::DuplicateId(EntityId::Int(1))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = perms(&[1, 2, 3]);
        store.replace(Permission::new(2, "two", "two")).unwrap();
        let names: Vec<_> = store.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p1", "two", "p3"]);
    }

    #[test]
    fn test_swap_changes_id_in_place() {
        let mut store = perms(&[1, 2]);
        store
            .swap(&EntityId::Int(2), Permission::new(10, "ten", "ten"))
            .unwrap();
        let ids: Vec<_> = store.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, [EntityId::Int(1), EntityId::Int(10)]);

        let err = store
            .swap(&EntityId::Int(10), Permission::new(1, "one", "one"))
            .unwrap_err();
        assert!(matches!(err, ResourceError::DuplicateId(_)));
    }

    #[test]
    fn test_upsert() {
        let mut store = perms(&[1, 2]);
        let old = store.upsert(Permission::new(1, "one", "one")).unwrap();
        assert_eq!(old.name, "p1");
        assert!(store.upsert(Permission::new(3, "three", "three")).is_none());
        let names: Vec<_> = store.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["one", "p2", "three"]);
    }

    #[test]
    fn test_settle_onto_existing_id() {
        let mut store = perms(&[1, 2, 3, 4]);
        store
            .settle(&EntityId::Int(4), Permission::new(3, "server", "server"))
            .unwrap();
        let ids: Vec<_> = store.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, [EntityId::Int(1), EntityId::Int(2), EntityId::Int(3)]);
        assert_eq!(store.get(&EntityId::Int(3)).unwrap().name, "server");

        store
            .settle(&EntityId::Int(3), Permission::new(9, "nine", "nine"))
            .unwrap();
        assert_eq!(store.as_slice().last().unwrap().id, EntityId::Int(9));
    }

    #[test]
    fn test_remove() {
        let mut store = perms(&[1, 2]);
        store.remove(&EntityId::Int(1)).unwrap();
        assert_eq!(store.as_slice(), perms(&[2]).as_slice());
        assert!(store.remove(&EntityId::Int(1)).is_err());
    }
}
