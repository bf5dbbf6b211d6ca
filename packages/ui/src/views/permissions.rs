use dioxus::prelude::*;
use store::{LoadState, Permission};

use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::{use_admin, use_resource_page, EntityForm, Icon, SearchBox};

use super::ModalOverlay;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Permission management page. Every change goes to the backend.
#[component]
pub fn PermissionsView() -> Element {
    let admin = use_admin();
    let page = use_resource_page::<Permission>(admin.config.permissions.clone());
    let rows = page.filtered();
    let (title, submit_label) = if page.is_editing() {
        ("Edit Permission", "Update Permission")
    } else {
        ("Add Permission", "Add Permission")
    };

    let body = match page.load_state() {
        LoadState::Idle | LoadState::Loading => rsx! {
            p { class: "resource-empty", "Loading permissions..." }
        },
        LoadState::Failed => rsx! {
            p { class: "resource-empty error", "Permissions could not be loaded." }
        },
        LoadState::Ready(_) if rows.is_empty() => rsx! {
            p { class: "resource-empty", "No permissions found." }
        },
        LoadState::Ready(_) => rsx! {
            table {
                class: "resource-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Code" }
                        th { class: "actions", "Actions" }
                    }
                }
                tbody {
                    for permission in rows {
                        tr {
                            key: "{permission.id}",
                            td { class: "cell-strong", "{permission.name}" }
                            td { code { "{permission.code}" } }
                            td {
                                class: "actions",
                                button {
                                    class: "icon-btn edit",
                                    title: "Edit",
                                    onclick: {
                                        let id = permission.id.clone();
                                        move |_| page.open_edit(&id)
                                    },
                                    Icon { icon: FaPen, width: 14, height: 14 }
                                }
                                button {
                                    class: "icon-btn delete",
                                    title: "Delete",
                                    onclick: {
                                        let id = permission.id.clone();
                                        move |_| page.delete(id.clone())
                                    },
                                    Icon { icon: FaTrash, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "resource-page",
            h1 { class: "resource-title", "Permissions Management" }
            div {
                class: "resource-toolbar",
                SearchBox {
                    value: page.filter_term(),
                    placeholder: "Search permissions...",
                    on_search: move |term: String| page.set_filter(term),
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| page.open_create(),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Add Permission"
                }
            }
            {body}
        }

        if page.is_form_open() {
            ModalOverlay {
                title: title.to_string(),
                on_close: move |_| page.close_form(),
                EntityForm {
                    fields: page.field_views(),
                    submit_label: submit_label.to_string(),
                    busy: page.is_busy(),
                    on_change: move |(name, value): (&'static str, String)| page.set_field(name, value),
                    on_blur: move |name: &'static str| page.blur_field(name),
                    on_submit: move |_| page.submit(),
                    on_cancel: move |_| page.close_form(),
                }
            }
        }
    }
}
