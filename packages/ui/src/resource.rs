//! # Resource page state as Dioxus signals
//!
//! [`use_resource_page`] builds the [`Pipeline`] for one entity type and
//! keeps the page state in signals: the store, the load state, the
//! search term, the form and whether the form modal is open. The returned
//! [`ResourcePage`] is `Copy`, so event handlers capture it by value.
//!
//! Loads and mutations run in spawned tasks through the shared pipeline. The
//! store signal is only borrowed inside the mutator's short [`StoreAccess`]
//! closures, never across an `.await`. Every notice the pipeline produces
//! ends up in the notification log.

use api::RestRemote;
use dioxus::prelude::*;
use store::{
    filter, Entity, EntityId, EntityStore, FormController, LoadState, Notice, Pipeline,
    ResourceConfig, StoreAccess,
};

use crate::admin::use_admin;
use crate::notifications::{notify, use_notifications, NotificationLog};
use crate::slot::{make_slot, PlatformSlot};

type PagePipeline<E> = Pipeline<E, RestRemote<E>, PlatformSlot>;

/// A store kept in a signal.
pub struct SignalStore<E: 'static>(pub Signal<EntityStore<E>>);

impl<E: Entity> StoreAccess<E> for SignalStore<E> {
    fn with_store<T>(&mut self, f: impl FnOnce(&mut EntityStore<E>) -> T) -> T {
        f(&mut self.0.write())
    }
}

/// One form input as the dialog renders it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
}

pub struct ResourcePage<E: Entity> {
    store: Signal<EntityStore<E>>,
    load_state: Signal<LoadState>,
    filter_term: Signal<String>,
    form: Signal<FormController<E>>,
    form_open: Signal<bool>,
    busy: Signal<bool>,
    pipeline: CopyValue<PagePipeline<E>>,
    notifications: Signal<NotificationLog>,
}

impl<E: Entity> Clone for ResourcePage<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> Copy for ResourcePage<E> {}

impl<E: Entity> PartialEq for ResourcePage<E> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && self.form == other.form
    }
}

/// Page state for entity type `E`, loaded once on mount.
pub fn use_resource_page<E: Entity>(settings: ResourceConfig) -> ResourcePage<E> {
    let admin = use_admin();
    let notifications = use_notifications();
    let validation = settings.validation;

    let store = use_signal(EntityStore::<E>::new);
    let mut load_state = use_signal(|| LoadState::Idle);
    let filter_term = use_signal(String::new);
    let form = use_signal(|| FormController::<E>::new(validation));
    let form_open = use_signal(|| false);
    let busy = use_signal(|| false);

    let pipeline = use_hook(|| {
        CopyValue::new(PagePipeline::<E>::new(
            admin.api.resource::<E>(),
            Some(make_slot()),
            &settings,
            admin.config.mutations.policy,
        ))
    });

    let page = ResourcePage {
        store,
        load_state,
        filter_term,
        form,
        form_open,
        busy,
        pipeline,
        notifications,
    };

    let _loader = use_resource(move || async move {
        let mut page = page;
        load_state.set(LoadState::Loading);
        let loaded = pipeline.cloned().load().await;
        page.store.set(loaded.store);
        load_state.set(loaded.state);
        if let Some(notice) = loaded.notice {
            notify(&mut page.notifications, notice);
        }
    });

    page
}

impl<E: Entity> ResourcePage<E> {
    pub fn load_state(&self) -> LoadState {
        (self.load_state)()
    }

    pub fn filter_term(&self) -> String {
        (self.filter_term)()
    }

    pub fn set_filter(mut self, term: String) {
        self.filter_term.set(term);
    }

    /// Store entries matching the search term, in store order.
    pub fn filtered(&self) -> Vec<E> {
        let term = self.filter_term.read();
        let store = self.store.read();
        let rows = filter::filter(&*store, term.as_str())
            .into_iter()
            .cloned()
            .collect();
        rows
    }

    pub fn is_form_open(&self) -> bool {
        (self.form_open)()
    }

    pub fn is_editing(&self) -> bool {
        self.form.read().is_editing()
    }

    pub fn is_busy(&self) -> bool {
        (self.busy)()
    }

    pub fn open_create(mut self) {
        self.form.write().open_create();
        self.form_open.set(true);
    }

    pub fn open_edit(mut self, id: &EntityId) {
        let entity = self.store.read().get(id).cloned();
        match entity {
            Some(entity) => {
                self.form.write().open_edit(&entity);
                self.form_open.set(true);
            }
            None => notify(
                &mut self.notifications,
                Notice::error(format!("{} {id} no longer exists", E::LABEL))
                    .with_source(E::LABEL),
            ),
        }
    }

    pub fn close_form(mut self) {
        self.form.write().cancel();
        self.form_open.set(false);
    }

    pub fn set_field(mut self, name: &str, value: String) {
        self.form.write().set_field(name, value);
    }

    pub fn blur_field(mut self, name: &str) {
        self.form.write().blur(name);
    }

    /// Schema fields with their current value and inline error.
    pub fn field_views(&self) -> Vec<FieldView> {
        let form = self.form.read();
        let views = form
            .schema()
            .fields
            .iter()
            .map(|rule| FieldView {
                name: rule.name,
                label: rule.label,
                value: form.value(rule.name).to_string(),
                error: form.error(rule.name).map(str::to_string),
            })
            .collect();
        views
    }

    /// Validate and run create or update. Invalid input only updates the
    /// inline errors.
    pub fn submit(mut self) {
        let submission = match self.form.write().submit() {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!(resource = E::RESOURCE, fields = errors.len(), "form has errors");
                return;
            }
        };
        let pipeline = self.pipeline.cloned();
        spawn(async move {
            self.busy.set(true);
            let outcome = pipeline.submit(&mut SignalStore(self.store), submission).await;
            self.busy.set(false);
            if outcome.result.is_ok() {
                self.close_form();
            }
            notify(&mut self.notifications, outcome.notice);
        });
    }

    pub fn delete(mut self, id: EntityId) {
        let pipeline = self.pipeline.cloned();
        spawn(async move {
            let outcome = pipeline.delete(&mut SignalStore(self.store), &id).await;
            notify(&mut self.notifications, outcome.notice);
        });
    }
}
