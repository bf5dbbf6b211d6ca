use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::collection::EntityStore;
use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;
use crate::remote::Remote;
use crate::slot::PersistentSlot;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory slot for testing and as a last-resort fallback.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentSlot for MemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>, ResourceError> {
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<(), ResourceError> {
        lock(&self.values).insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), ResourceError> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// In-memory stand-in for a REST resource. Assigns `max + 1` ids and can be
/// switched offline to exercise failure paths.
#[derive(Clone, Debug)]
pub struct MemoryRemote<E: Entity> {
    records: Arc<Mutex<EntityStore<E>>>,
    offline: Arc<AtomicBool>,
}

impl<E: Entity> Default for MemoryRemote<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Entity> MemoryRemote<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self {
            records: Arc::new(Mutex::new(EntityStore::from_entities(records))),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Current server-side records.
    pub fn records(&self) -> Vec<E> {
        lock(&self.records).clone().into_vec()
    }

    fn check_online(&self) -> Result<(), ResourceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ResourceError::Network(format!(
                "{} backend unreachable",
                E::RESOURCE
            )));
        }
        Ok(())
    }
}

impl<E: Entity> Remote<E> for MemoryRemote<E> {
    async fn list(&self) -> Result<Vec<E>, ResourceError> {
        self.check_online()?;
        Ok(self.records())
    }

    async fn create(&self, draft: &E::Draft) -> Result<E, ResourceError> {
        self.check_online()?;
        let mut records = lock(&self.records);
        let entity = E::from_draft(records.next_id(), draft.clone());
        records.insert(entity.clone())?;
        Ok(entity)
    }

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<Option<E>, ResourceError> {
        self.check_online()?;
        let mut records = lock(&self.records);
        let merged = records
            .get(id)
            .map(|e| e.merge(draft))
            .ok_or_else(|| ResourceError::Network(format!("404 for {}/{id}", E::RESOURCE)))?;
        records.replace(merged.clone())?;
        Ok(Some(merged))
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ResourceError> {
        self.check_online()?;
        lock(&self.records)
            .remove(id)
            .map(|_| ())
            .map_err(|_| ResourceError::Network(format!("404 for {}/{id}", E::RESOURCE)))
    }
}
