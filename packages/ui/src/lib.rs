//! This crate contains all shared UI for the admin console.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod slot;
pub use slot::{make_slot, PlatformSlot};

mod admin;
pub use admin::{use_admin, AdminContext, AdminProvider};

mod resource;
pub use resource::{use_resource_page, FieldView, ResourcePage, SignalStore};

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod badges;
pub use badges::{RoleBadge, StatusBadge};

mod search_box;
pub use search_box::SearchBox;

mod entity_form;
pub use entity_form::EntityForm;

pub mod notifications;
pub use notifications::{notify, use_notifications, NotificationLog};

mod notification_panel;
pub use notification_panel::{NotificationPanel, NotificationToggle};
