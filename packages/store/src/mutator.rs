//! # Mutator: create, update and delete against store, remote and slot
//!
//! Every mutation follows one of three paths, chosen by [`WriteMode`] and
//! [`MutationPolicy`]:
//!
//! | Mode / policy | Order | On remote failure |
//! |---------------|-------|-------------------|
//! | `local_only` | store, then slot | n/a (no remote call) |
//! | `remote` + `pessimistic` | remote, then store, then slot | store untouched |
//! | `remote` + `optimistic` | store, then remote, then slot | store restored from the pre-mutation snapshot |
//!
//! Ids: local-only and optimistic creates use [`EntityStore::next_id`]
//! (`max + 1`). An optimistic create's provisional entity is swapped for the
//! server's entity once the `POST` answers, so the server-assigned id wins.
//! If the store already holds that id (it was loaded before someone else
//! deleted and the server reused the id), the server's entity replaces the
//! stale entry rather than failing the create.
//!
//! The store is only touched inside [`StoreAccess::with_store`] closures,
//! never across an `.await`. A slot write failure after a successful mutation
//! is logged and does not fail the mutation.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::collection::{EntityStore, StoreAccess};
use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;
use crate::remote::Remote;
use crate::slot::{PersistentSlot, SnapshotSlot};

/// When the store changes relative to the remote call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    Optimistic,
    #[default]
    Pessimistic,
}

/// Whether mutations are sent to the remote at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Remote,
    LocalOnly,
}

pub struct Mutator<E, R, S> {
    remote: R,
    slot: Option<SnapshotSlot<S>>,
    policy: MutationPolicy,
    write_mode: WriteMode,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R: Clone, S: Clone> Clone for Mutator<E, R, S> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            slot: self.slot.clone(),
            policy: self.policy,
            write_mode: self.write_mode,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, R: Remote<E>, S: PersistentSlot> Mutator<E, R, S> {
    pub fn new(
        remote: R,
        slot: Option<SnapshotSlot<S>>,
        policy: MutationPolicy,
        write_mode: WriteMode,
    ) -> Self {
        Self {
            remote,
            slot,
            policy,
            write_mode,
            _entity: PhantomData,
        }
    }

    pub fn policy(&self) -> MutationPolicy {
        self.policy
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    fn optimistic(&self) -> bool {
        self.policy == MutationPolicy::Optimistic
    }

    /// Add a new entity built from `draft` at the end of the store.
    pub async fn create(
        &self,
        store: &mut impl StoreAccess<E>,
        draft: E::Draft,
    ) -> Result<E, ResourceError> {
        let created = match self.write_mode {
            WriteMode::LocalOnly => store.with_store(|s| {
                let entity = E::from_draft(s.next_id(), draft);
                s.insert(entity.clone()).map(|()| entity)
            })?,
            WriteMode::Remote if self.optimistic() => {
                let snapshot = store.snapshot();
                let provisional = E::from_draft(snapshot.next_id(), draft.clone());
                let provisional_id = provisional.id().clone();
                store.with_store(|s| s.insert(provisional))?;

                let confirmed = match self.remote.create(&draft).await {
                    Ok(entity) => store.with_store(|s| {
                        Self::warn_if_stale(s, &entity, Some(&provisional_id));
                        s.settle(&provisional_id, entity.clone()).map(|()| entity)
                    }),
                    Err(err) => Err(err),
                };
                match confirmed {
                    Ok(entity) => entity,
                    Err(err) => return Err(self.rollback(store, snapshot, "create", err)),
                }
            }
            WriteMode::Remote => {
                let entity = self.remote.create(&draft).await?;
                store.with_store(|s| {
                    Self::warn_if_stale(s, &entity, None);
                    s.upsert(entity.clone());
                });
                entity
            }
        };

        info!(resource = E::RESOURCE, id = %created.id(), "created");
        self.persist(store).await;
        Ok(created)
    }

    /// Overlay `draft` on the entity with `id`. Other entities are untouched.
    pub async fn update(
        &self,
        store: &mut impl StoreAccess<E>,
        id: &EntityId,
        draft: E::Draft,
    ) -> Result<E, ResourceError> {
        let merged = store.with_store(|s| {
            s.get(id)
                .map(|existing| existing.merge(&draft))
                .ok_or_else(|| ResourceError::NotFound(id.clone()))
        })?;

        let updated = match self.write_mode {
            WriteMode::LocalOnly => {
                store.with_store(|s| s.replace(merged.clone()))?;
                merged
            }
            WriteMode::Remote if self.optimistic() => {
                let snapshot = store.snapshot();
                store.with_store(|s| s.replace(merged.clone()))?;
                match self.remote.update(id, &draft).await {
                    Ok(response) => {
                        let confirmed = Self::accept_response(id, response, merged);
                        store.with_store(|s| s.replace(confirmed.clone()))?;
                        confirmed
                    }
                    Err(err) => return Err(self.rollback(store, snapshot, "update", err)),
                }
            }
            WriteMode::Remote => {
                let response = self.remote.update(id, &draft).await?;
                let confirmed = Self::accept_response(id, response, merged);
                store.with_store(|s| s.replace(confirmed.clone()))?;
                confirmed
            }
        };

        info!(resource = E::RESOURCE, %id, "updated");
        self.persist(store).await;
        Ok(updated)
    }

    /// Remove the entity with `id`. Returns the removed entity.
    pub async fn delete(
        &self,
        store: &mut impl StoreAccess<E>,
        id: &EntityId,
    ) -> Result<E, ResourceError> {
        let removed = match self.write_mode {
            WriteMode::LocalOnly => store.with_store(|s| s.remove(id))?,
            WriteMode::Remote if self.optimistic() => {
                let snapshot = store.snapshot();
                let removed = store.with_store(|s| s.remove(id))?;
                if let Err(err) = self.remote.delete(id).await {
                    return Err(self.rollback(store, snapshot, "delete", err));
                }
                removed
            }
            WriteMode::Remote => {
                if !store.with_store(|s| s.contains(id)) {
                    return Err(ResourceError::NotFound(id.clone()));
                }
                self.remote.delete(id).await?;
                store.with_store(|s| s.remove(id))?
            }
        };

        info!(resource = E::RESOURCE, %id, "deleted");
        self.persist(store).await;
        Ok(removed)
    }

    /// A created id already held locally means the store lags the server.
    fn warn_if_stale(store: &EntityStore<E>, created: &E, provisional: Option<&EntityId>) {
        if provisional != Some(created.id()) && store.contains(created.id()) {
            warn!(
                resource = E::RESOURCE,
                id = %created.id(),
                "server assigned an id held by a stale local entry, replacing it"
            );
        }
    }

    /// The server's entity when it carries the expected id, else `merged`.
    fn accept_response(id: &EntityId, response: Option<E>, merged: E) -> E {
        match response {
            Some(entity) if entity.id() == id => entity,
            Some(entity) => {
                warn!(
                    resource = E::RESOURCE,
                    %id,
                    returned = %entity.id(),
                    "update response names another id, keeping local merge"
                );
                merged
            }
            None => merged,
        }
    }

    fn rollback(
        &self,
        store: &mut impl StoreAccess<E>,
        snapshot: EntityStore<E>,
        action: &str,
        err: ResourceError,
    ) -> ResourceError {
        warn!(resource = E::RESOURCE, action, "rolling back optimistic change: {err}");
        store.restore(snapshot);
        err
    }

    async fn persist(&self, store: &mut impl StoreAccess<E>) {
        let Some(slot) = &self.slot else {
            return;
        };
        let snapshot = store.snapshot();
        if let Err(err) = slot.save(&snapshot).await {
            warn!(resource = E::RESOURCE, key = slot.key(), "could not persist snapshot: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Permission, PermissionDraft, Role, Status, User, UserDraft};
    use crate::{MemoryRemote, MemorySlot};

    fn draft(name: &str, code: &str) -> PermissionDraft {
        PermissionDraft {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn seeded() -> (MemoryRemote<Permission>, EntityStore<Permission>) {
        let records = vec![Permission::new(1, "Read", "read"), Permission::new(2, "Write", "write")];
        (
            MemoryRemote::new(records.clone()),
            EntityStore::from_entities(records),
        )
    }

    fn mutator(
        remote: &MemoryRemote<Permission>,
        policy: MutationPolicy,
    ) -> Mutator<Permission, MemoryRemote<Permission>, MemorySlot> {
        Mutator::new(remote.clone(), None, policy, WriteMode::Remote)
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_with_server_id() {
        for policy in [MutationPolicy::Pessimistic, MutationPolicy::Optimistic] {
            let (remote, mut store) = seeded();
            let before = store.len();
            let created = mutator(&remote, policy)
                .create(&mut store, draft("Audit", "audit"))
                .await
                .unwrap();

            assert_eq!(store.len(), before + 1);
            assert_eq!(created.id, EntityId::Int(3));
            assert_eq!(store.as_slice().last(), Some(&created));
            assert_eq!(remote.records().len(), 3);
        }
    }

    #[tokio::test]
    async fn test_update_changes_only_target() {
        for policy in [MutationPolicy::Pessimistic, MutationPolicy::Optimistic] {
            let (remote, mut store) = seeded();
            let id = EntityId::Int(2);
            mutator(&remote, policy)
                .update(&mut store, &id, draft("Write all", "write"))
                .await
                .unwrap();

            assert_eq!(store.len(), 2);
            assert_eq!(store.get(&id).unwrap().name, "Write all");
            assert_eq!(store.get(&EntityId::Int(1)).unwrap().name, "Read");
        }
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        for policy in [MutationPolicy::Pessimistic, MutationPolicy::Optimistic] {
            let (remote, mut store) = seeded();
            let id = EntityId::Int(1);
            mutator(&remote, policy).delete(&mut store, &id).await.unwrap();

            assert_eq!(store.len(), 1);
            assert!(!store.contains(&id));
            assert!(store.contains(&EntityId::Int(2)));
        }
    }

    #[tokio::test]
    async fn test_pessimistic_failure_leaves_store_alone() {
        let (remote, mut store) = seeded();
        let before = store.clone();
        remote.set_offline(true);
        let m = mutator(&remote, MutationPolicy::Pessimistic);

        assert!(m.create(&mut store, draft("x", "x")).await.unwrap_err().is_network());
        assert!(m
            .update(&mut store, &EntityId::Int(1), draft("x", "x"))
            .await
            .unwrap_err()
            .is_network());
        assert!(m.delete(&mut store, &EntityId::Int(1)).await.unwrap_err().is_network());
        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_optimistic_failure_rolls_back() {
        let (remote, mut store) = seeded();
        let before = store.clone();
        remote.set_offline(true);
        let m = mutator(&remote, MutationPolicy::Optimistic);

        assert!(m.create(&mut store, draft("x", "x")).await.is_err());
        assert_eq!(store, before);
        assert!(m
            .update(&mut store, &EntityId::Int(2), draft("x", "x"))
            .await
            .is_err());
        assert_eq!(store, before);
        assert!(m.delete(&mut store, &EntityId::Int(2)).await.is_err());
        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_missing_target_is_not_found() {
        let (remote, mut store) = seeded();
        let m = mutator(&remote, MutationPolicy::Pessimistic);
        let err = m
            .update(&mut store, &EntityId::Int(9), draft("x", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(EntityId::Int(9))));
        assert!(m.delete(&mut store, &EntityId::Int(9)).await.is_err());
        assert_eq!(remote.records().len(), 2);
    }

    #[tokio::test]
    async fn test_create_over_stale_local_entry() {
        for policy in [MutationPolicy::Pessimistic, MutationPolicy::Optimistic] {
            let (remote, mut store) = seeded();
            store.insert(Permission::new(3, "Stale", "stale")).unwrap();

            let created = mutator(&remote, policy)
                .create(&mut store, draft("Audit", "audit"))
                .await
                .unwrap();

            assert_eq!(created.id, EntityId::Int(3));
            assert_eq!(store.len(), 3);
            assert_eq!(store.get(&EntityId::Int(3)).unwrap().name, "Audit");
            assert_eq!(remote.records(), store.clone().into_vec());
        }
    }

    #[tokio::test]
    async fn test_local_only_create_when_max_id_taken() {
        let m: Mutator<User, MemoryRemote<User>, MemorySlot> = Mutator::new(
            MemoryRemote::default(),
            None,
            MutationPolicy::Pessimistic,
            WriteMode::LocalOnly,
        );
        let mut store = EntityStore::from_entities(vec![User::new(
            i64::MAX,
            "Max",
            "max@x.com",
            Role::User,
            Status::Active,
        )]);
        let created = m
            .create(
                &mut store,
                UserDraft {
                    name: "Min".to_string(),
                    email: "min@x.com".to_string(),
                    role: Role::Guest,
                    status: Status::Active,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, EntityId::Int(1));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_local_only_assigns_max_plus_one_and_persists() {
        let remote = MemoryRemote::<User>::default();
        remote.set_offline(true);
        let slot = SnapshotSlot::new(MemorySlot::new(), "users");
        let m = Mutator::new(
            remote,
            Some(slot.clone()),
            MutationPolicy::Pessimistic,
            WriteMode::LocalOnly,
        );

        let mut store = EntityStore::from_entities(vec![
            User::new(1, "Alice", "a@x.com", Role::Admin, Status::Active),
            User::new(5, "Eve", "e@x.com", Role::Guest, Status::Inactive),
        ]);
        let created = m
            .create(
                &mut store,
                UserDraft {
                    name: "Bob".to_string(),
                    email: "b@x.com".to_string(),
                    role: Role::User,
                    status: Status::Active,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, EntityId::Int(6));
        assert_eq!(slot.load::<User>().await.unwrap().unwrap(), store);

        m.delete(&mut store, &EntityId::Int(1)).await.unwrap();
        let persisted = slot.load::<User>().await.unwrap().unwrap();
        assert_eq!(persisted.len(), 2);
        assert!(!persisted.contains(&EntityId::Int(1)));
    }
}
