//! # Persistent slots: named key/value storage for store snapshots
//!
//! A [`PersistentSlot`] is the smallest storage contract the resource layer
//! needs: read, overwrite or clear a string under a key. Implementations:
//!
//! | Type | Backing | Platform |
//! |------|---------|----------|
//! | [`crate::MemorySlot`] | `HashMap` behind a mutex | any (tests, fallback) |
//! | [`crate::FileSlot`] | one `<key>.json` file per key | native |
//! | `LocalStorageSlot` | browser `localStorage` | wasm + `web` feature |
//!
//! [`SnapshotSlot`] binds a slot to one key and stores a whole
//! [`EntityStore`] as a JSON array, which is the format the admin page has
//! always kept under the `users` key.

use std::future::Future;

use tracing::debug;

use crate::collection::EntityStore;
use crate::entity::Entity;
use crate::error::ResourceError;

/// Async string storage addressed by key.
pub trait PersistentSlot {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, ResourceError>>;
    fn write(&self, key: &str, value: String) -> impl Future<Output = Result<(), ResourceError>>;
    fn clear(&self, key: &str) -> impl Future<Output = Result<(), ResourceError>>;
}

/// A slot bound to a single key holding a serialised store.
#[derive(Clone, Debug)]
pub struct SnapshotSlot<S> {
    slot: S,
    key: String,
}

impl<S: PersistentSlot> SnapshotSlot<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored snapshot, or `None` when the key was never written.
    pub async fn load<E: Entity>(&self) -> Result<Option<EntityStore<E>>, ResourceError> {
        let Some(raw) = self.slot.read(&self.key).await? else {
            return Ok(None);
        };
        let entities: Vec<E> = serde_json::from_str(&raw)?;
        debug!(key = %self.key, count = entities.len(), "loaded snapshot");
        Ok(Some(EntityStore::from_entities(entities)))
    }

    /// Overwrite the key with the full store.
    pub async fn save<E: Entity>(&self, store: &EntityStore<E>) -> Result<(), ResourceError> {
        let raw = serde_json::to_string(store.as_slice())?;
        self.slot.write(&self.key, raw).await
    }

    pub async fn clear(&self) -> Result<(), ResourceError> {
        self.slot.clear(&self.key).await
    }
}
