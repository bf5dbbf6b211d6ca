//! # Resource manager: one resource page's state in a single value
//!
//! [`ResourceManager`] wires the pieces of a resource page together:
//!
//! ```text
//! load() ──> Fetcher ──> EntityStore ──> filtered() (derived on demand)
//!                             ▲
//! form ──submit()──> Mutator ─┘──> remote / slot
//! ```
//!
//! It owns the [`EntityStore`], the [`FormController`] (whose editing target
//! decides between create and update), the search term, the [`LoadState`]
//! and a queue of [`Notice`]s. Failures never propagate as panics: a failed
//! load leaves an empty store plus an error notice, a failed mutation leaves
//! the store as the mutator left it (unchanged or rolled back) plus an error
//! notice, and a validation failure only fills the form's inline errors.
//!
//! Loading and mutating go through the same [`Pipeline`] the UI uses; this
//! type adds the page state around it for callers without a reactive runtime.

use crate::collection::EntityStore;
use crate::config::ResourceConfig;
use crate::entity::{Entity, EntityId};
use crate::error::ResourceError;
use crate::filter;
use crate::form::FormController;
use crate::mutator::MutationPolicy;
use crate::notice::{Notice, Notices};
use crate::pipeline::{LoadState, Outcome, Pipeline};
use crate::remote::Remote;
use crate::slot::PersistentSlot;

pub struct ResourceManager<E: Entity, R, S> {
    store: EntityStore<E>,
    pipeline: Pipeline<E, R, S>,
    form: FormController<E>,
    form_open: bool,
    filter_term: String,
    load_state: LoadState,
    notices: Notices,
}

impl<E, R, S> ResourceManager<E, R, S>
where
    E: Entity,
    R: Remote<E> + Clone,
    S: PersistentSlot + Clone,
{
    /// `slot` is only used when `config.slot_key` is set.
    pub fn new(remote: R, slot: Option<S>, config: &ResourceConfig, policy: MutationPolicy) -> Self {
        Self {
            store: EntityStore::new(),
            pipeline: Pipeline::new(remote, slot, config, policy),
            form: FormController::new(config.validation),
            form_open: false,
            filter_term: String::new(),
            load_state: LoadState::Idle,
            notices: Notices::default(),
        }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Populate the store. On failure the store is emptied and an error
    /// notice queued.
    pub async fn load(&mut self) {
        self.load_state = LoadState::Loading;
        let loaded = self.pipeline.load().await;
        self.store = loaded.store;
        self.load_state = loaded.state;
        if let Some(notice) = loaded.notice {
            self.notices.push(notice);
        }
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter_term = term.into();
    }

    /// The store narrowed by the current search term, in store order.
    pub fn filtered(&self) -> Vec<&E> {
        filter::filter(&self.store, &self.filter_term)
    }

    pub fn form(&self) -> &FormController<E> {
        &self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
        self.form_open = true;
    }

    pub fn open_edit(&mut self, id: &EntityId) -> Result<(), ResourceError> {
        let entity = self
            .store
            .get(id)
            .ok_or_else(|| ResourceError::NotFound(id.clone()))?;
        self.form.open_edit(entity);
        self.form_open = true;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
        self.form_open = false;
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.set_field(name, value);
    }

    pub fn blur_field(&mut self, name: &str) {
        self.form.blur(name);
    }

    /// Validate the form and run create or update. Invalid input never
    /// reaches the mutator. On success the form closes.
    pub async fn submit(&mut self) -> Result<E, ResourceError> {
        let submission = self.form.submit().map_err(ResourceError::Validation)?;
        let outcome = self.pipeline.submit(&mut self.store, submission).await;
        if outcome.result.is_ok() {
            self.cancel_edit();
        }
        self.record(outcome)
    }

    pub async fn delete(&mut self, id: &EntityId) -> Result<E, ResourceError> {
        let outcome = self.pipeline.delete(&mut self.store, id).await;
        self.record(outcome)
    }

    fn record(&mut self, outcome: Outcome<E>) -> Result<E, ResourceError> {
        self.notices.push(outcome.notice);
        outcome.result
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::LoadSource;
    use crate::models::{Permission, Role, Status, User};
    use crate::notice::NoticeLevel;
    use crate::{MemoryRemote, MemorySlot};

    type Users = ResourceManager<User, MemoryRemote<User>, MemorySlot>;
    type Permissions = ResourceManager<Permission, MemoryRemote<Permission>, MemorySlot>;

    fn alice() -> User {
        User::new(1, "Alice", "a@x.com", Role::Admin, Status::Active)
    }

    fn fill_user(m: &mut Users, name: &str, email: &str) {
        m.set_field("name", name);
        m.set_field("email", email);
        m.set_field("role", "user");
        m.set_field("status", "active");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_store_and_notice() {
        let remote = MemoryRemote::new(vec![alice()]);
        remote.set_offline(true);
        let mut users = Users::new(remote, None, &ResourceConfig::users(), MutationPolicy::default());

        users.load().await;
        assert_eq!(users.load_state(), LoadState::Failed);
        assert!(users.store().is_empty());
        let notices = users.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_create_with_empty_name_is_blocked() {
        let remote = MemoryRemote::new(vec![alice()]);
        let mut users = Users::new(
            remote,
            Some(MemorySlot::new()),
            &ResourceConfig::users(),
            MutationPolicy::default(),
        );
        users.load().await;

        users.open_create();
        fill_user(&mut users, "", "b@x.com");
        let err = users.submit().await.unwrap_err();
        match err {
            ResourceError::Validation(fields) => {
                assert_eq!(fields["name"], "Name is required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(users.store().len(), 1);
        assert!(users.is_form_open());
        assert!(users.notices().is_empty());
    }

    #[tokio::test]
    async fn test_users_flow_persists_locally() {
        let slot = MemorySlot::new();
        let remote = MemoryRemote::new(vec![alice()]);
        let mut users = Users::new(
            remote.clone(),
            Some(slot.clone()),
            &ResourceConfig::users(),
            MutationPolicy::default(),
        );
        users.load().await;
        assert_eq!(users.load_state(), LoadState::Ready(LoadSource::Remote));

        users.open_create();
        fill_user(&mut users, "Bob", "b@x.com");
        let bob = users.submit().await.unwrap();
        assert_eq!(bob.id, EntityId::Int(2));
        assert!(!users.is_form_open());

        users.open_edit(&EntityId::Int(1)).unwrap();
        users.set_field("status", "inactive");
        users.submit().await.unwrap();

        users.delete(&EntityId::Int(2)).await.unwrap();

        // local-only: the backend never saw the edits
        assert_eq!(remote.records(), vec![alice()]);

        // a fresh page session reads the snapshot
        let mut reopened = Users::new(remote, Some(slot), &ResourceConfig::users(), MutationPolicy::default());
        reopened.load().await;
        assert_eq!(reopened.load_state(), LoadState::Ready(LoadSource::Slot));
        assert_eq!(reopened.store(), users.store());
        assert_eq!(
            reopened.store().get(&EntityId::Int(1)).unwrap().status,
            Status::Inactive
        );
    }

    #[tokio::test]
    async fn test_filter_view_follows_mutations() {
        let remote = MemoryRemote::new(vec![alice()]);
        let mut users = Users::new(remote, None, &ResourceConfig::users(), MutationPolicy::default());
        users.load().await;

        users.set_filter("alice");
        assert_eq!(users.filtered().len(), 1);
        users.set_filter("zzz");
        assert!(users.filtered().is_empty());

        users.set_filter("x.com");
        users.open_create();
        fill_user(&mut users, "Carol", "carol@x.com");
        users.submit().await.unwrap();
        assert_eq!(users.filtered().len(), 2);
    }

    #[tokio::test]
    async fn test_permission_mutation_failure_notifies() {
        let remote = MemoryRemote::new(vec![Permission::new(1, "Read", "read")]);
        let mut perms = Permissions::new(
            remote.clone(),
            None,
            &ResourceConfig::permissions(),
            MutationPolicy::Optimistic,
        );
        perms.load().await;

        remote.set_offline(true);
        perms.open_edit(&EntityId::Int(1)).unwrap();
        perms.set_field("name", "Read all");
        assert!(perms.submit().await.unwrap_err().is_network());
        assert_eq!(perms.store().get(&EntityId::Int(1)).unwrap().name, "Read");
        assert!(perms.is_form_open());
        assert!(perms.notices().has_errors());

        remote.set_offline(false);
        perms.submit().await.unwrap();
        assert_eq!(perms.store().get(&EntityId::Int(1)).unwrap().name, "Read all");
        assert_eq!(remote.records()[0].name, "Read all");
    }

    #[tokio::test]
    async fn test_delete_scenario() {
        let remote = MemoryRemote::new(vec![
            Permission::new(1, "Read", "read"),
            Permission::new(2, "Write", "write"),
        ]);
        let mut perms = Permissions::new(
            remote,
            None,
            &ResourceConfig::permissions(),
            MutationPolicy::Pessimistic,
        );
        perms.load().await;
        perms.delete(&EntityId::Int(1)).await.unwrap();
        let ids: Vec<_> = perms.store().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, [EntityId::Int(2)]);
    }
}
