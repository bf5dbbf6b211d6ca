//! Initial population of a store: local snapshot first, remote second.

use std::marker::PhantomData;

use tracing::{info, warn};

use crate::collection::EntityStore;
use crate::entity::Entity;
use crate::error::ResourceError;
use crate::remote::Remote;
use crate::slot::{PersistentSlot, SnapshotSlot};

/// Where a loaded store came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    Slot,
    Remote,
}

pub struct Fetcher<E, R, S> {
    remote: R,
    slot: Option<SnapshotSlot<S>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R: Clone, S: Clone> Clone for Fetcher<E, R, S> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            slot: self.slot.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, R: Remote<E>, S: PersistentSlot> Fetcher<E, R, S> {
    pub fn new(remote: R, slot: Option<SnapshotSlot<S>>) -> Self {
        Self {
            remote,
            slot,
            _entity: PhantomData,
        }
    }

    /// Load the store. A stored snapshot wins; otherwise the remote list is
    /// fetched and, when a slot is bound, written to it. A network failure is
    /// returned as is: no retry.
    pub async fn load(&self) -> Result<(EntityStore<E>, LoadSource), ResourceError> {
        if let Some(slot) = &self.slot {
            match slot.load::<E>().await {
                Ok(Some(store)) => {
                    info!(resource = E::RESOURCE, count = store.len(), "loaded from local slot");
                    return Ok((store, LoadSource::Slot));
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(resource = E::RESOURCE, key = slot.key(), "ignoring unreadable slot: {err}");
                }
            }
        }

        let store = EntityStore::from_entities(self.remote.list().await?);
        info!(resource = E::RESOURCE, count = store.len(), "loaded from remote");

        if let Some(slot) = &self.slot {
            if let Err(err) = slot.save(&store).await {
                warn!(resource = E::RESOURCE, key = slot.key(), "could not persist snapshot: {err}");
            }
        }
        Ok((store, LoadSource::Remote))
    }
}
