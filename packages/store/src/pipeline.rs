//! # Pipeline: the page actions shared by every front end
//!
//! A [`Pipeline`] pairs a [`Fetcher`] and a [`Mutator`] over one remote and
//! one slot, and turns each page action into a finished result plus the
//! [`Notice`] to show for it:
//!
//! | Action | Success | Failure |
//! |--------|---------|---------|
//! | [`Pipeline::load`] | loaded store, `Ready(source)` | empty store, `Failed`, error notice |
//! | [`Pipeline::submit`] | "`<Label>` created/updated" | "Failed to create/update `<Label>`: ..." |
//! | [`Pipeline::delete`] | "`<Label>` deleted" | "Failed to delete `<Label>`: ..." |
//!
//! [`ResourceManager`](crate::ResourceManager) keeps the page in plain fields
//! and the UI keeps it in signals; both drive the store through
//! [`StoreAccess`] and hand the notices to their own sinks.

use tracing::info;

use crate::collection::{EntityStore, StoreAccess};
use crate::config::ResourceConfig;
use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;
use crate::fetcher::{Fetcher, LoadSource};
use crate::form::Submission;
use crate::mutator::{MutationPolicy, Mutator};
use crate::notice::Notice;
use crate::remote::Remote;
use crate::slot::{PersistentSlot, SnapshotSlot};

/// Progress of the initial fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready(LoadSource),
    Failed,
}

/// What a page should show after [`Pipeline::load`].
#[derive(Debug)]
pub struct Loaded<E> {
    pub store: EntityStore<E>,
    pub state: LoadState,
    pub notice: Option<Notice>,
}

/// A finished mutation and the notice reporting it.
#[derive(Debug)]
pub struct Outcome<E> {
    pub result: Result<E, ResourceError>,
    pub notice: Notice,
}

pub struct Pipeline<E, R, S> {
    fetcher: Fetcher<E, R, S>,
    mutator: Mutator<E, R, S>,
}

impl<E, R: Clone, S: Clone> Clone for Pipeline<E, R, S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            mutator: self.mutator.clone(),
        }
    }
}

impl<E, R, S> Pipeline<E, R, S>
where
    E: Entity,
    R: Remote<E> + Clone,
    S: PersistentSlot + Clone,
{
    /// `slot` is only used when `config.slot_key` is set.
    pub fn new(remote: R, slot: Option<S>, config: &ResourceConfig, policy: MutationPolicy) -> Self {
        let slot = match (slot, &config.slot_key) {
            (Some(slot), Some(key)) => Some(SnapshotSlot::new(slot, key.clone())),
            _ => None,
        };
        Self {
            fetcher: Fetcher::new(remote.clone(), slot.clone()),
            mutator: Mutator::new(remote, slot, policy, config.write_mode),
        }
    }

    pub async fn load(&self) -> Loaded<E> {
        match self.fetcher.load().await {
            Ok((store, source)) => Loaded {
                store,
                state: LoadState::Ready(source),
                notice: None,
            },
            Err(err) => Loaded {
                store: EntityStore::new(),
                state: LoadState::Failed,
                notice: Some(Notice::failed("load", E::LABEL, &err)),
            },
        }
    }

    /// Run create or update, depending on the submission's editing target.
    pub async fn submit(
        &self,
        store: &mut impl StoreAccess<E>,
        submission: Submission<E>,
    ) -> Outcome<E> {
        let (action, result) = match &submission.target {
            Some(id) => (
                "update",
                self.mutator.update(store, id, submission.draft).await,
            ),
            None => ("create", self.mutator.create(store, submission.draft).await),
        };
        let notice = match &result {
            Ok(_) => Notice::success(format!("{} {action}d", E::LABEL)).with_source(E::LABEL),
            Err(err) => Notice::failed(action, E::LABEL, err),
        };
        Outcome { result, notice }
    }

    pub async fn delete(&self, store: &mut impl StoreAccess<E>, id: &EntityId) -> Outcome<E> {
        let result = self.mutator.delete(store, id).await;
        let notice = match &result {
            Ok(_) => {
                info!(resource = E::RESOURCE, %id, "removed from page");
                Notice::success(format!("{} deleted", E::LABEL)).with_source(E::LABEL)
            }
            Err(err) => Notice::failed("delete", E::LABEL, err),
        };
        Outcome { result, notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::models::{Permission, PermissionDraft};
    use crate::notice::NoticeLevel;
    use crate::{MemoryRemote, MemorySlot, ValidationMode};

    type Permissions = Pipeline<Permission, MemoryRemote<Permission>, MemorySlot>;

    fn pipeline(remote: &MemoryRemote<Permission>) -> Permissions {
        Pipeline::new(
            remote.clone(),
            None,
            &ResourceConfig::permissions(),
            MutationPolicy::Pessimistic,
        )
    }

    #[tokio::test]
    async fn test_load_reports_source_or_failure() {
        let remote = MemoryRemote::new(vec![Permission::new(1, "Read", "read")]);
        let loaded = pipeline(&remote).load().await;
        assert_eq!(loaded.state, LoadState::Ready(LoadSource::Remote));
        assert_eq!(loaded.store.len(), 1);
        assert!(loaded.notice.is_none());

        remote.set_offline(true);
        let loaded = pipeline(&remote).load().await;
        assert_eq!(loaded.state, LoadState::Failed);
        assert!(loaded.store.is_empty());
        let notice = loaded.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.source, Some("Permission"));
    }

    #[tokio::test]
    async fn test_submit_notice_names_the_action() {
        let remote = MemoryRemote::new(vec![Permission::new(1, "Read", "read")]);
        let mut store = EntityStore::from_entities(remote.records());
        let mut form = FormController::<Permission>::new(ValidationMode::OnChange);
        form.open_create();
        form.set_field("name", "Write");
        form.set_field("code", "write");

        let outcome = pipeline(&remote)
            .submit(&mut store, form.submit().unwrap())
            .await;
        assert_eq!(outcome.result.unwrap().id, EntityId::Int(2));
        assert_eq!(outcome.notice, Notice::success("Permission created").with_source("Permission"));

        remote.set_offline(true);
        let outcome = pipeline(&remote).delete(&mut store, &EntityId::Int(2)).await;
        assert!(outcome.result.unwrap_err().is_network());
        assert!(outcome.notice.message.starts_with("Failed to delete Permission"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_update_goes_through_editing_target() {
        let remote = MemoryRemote::new(vec![Permission::new(1, "Read", "read")]);
        let mut store = EntityStore::from_entities(remote.records());
        let submission = Submission {
            target: Some(EntityId::Int(1)),
            draft: PermissionDraft {
                name: "Read all".to_string(),
                code: "read".to_string(),
            },
        };

        let outcome = pipeline(&remote).submit(&mut store, submission).await;
        assert_eq!(outcome.notice.message, "Permission updated");
        assert_eq!(store.get(&EntityId::Int(1)).unwrap().name, "Read all");
        assert_eq!(store.len(), 1);
    }
}
