use dioxus::prelude::*;
use store::{Role, Status};

/// Pill for a user role. Unknown roles render as neutral text.
#[component]
pub fn RoleBadge(role: Role) -> Element {
    let (class, label) = match &role {
        Role::Admin => ("role-badge role-admin", "Admin".to_string()),
        Role::Guest => ("role-badge role-guest", "Guest".to_string()),
        Role::User => ("role-badge role-user", "User".to_string()),
        Role::Other(text) => ("role-badge role-other", text.clone()),
    };
    rsx! {
        span { class, "{label}" }
    }
}

#[component]
pub fn StatusBadge(status: Status) -> Element {
    let (class, label) = match &status {
        Status::Active => ("status-badge status-active", "Active".to_string()),
        Status::Inactive => ("status-badge status-inactive", "Inactive".to_string()),
        Status::Other(text) => ("status-badge status-other", text.clone()),
    };
    rsx! {
        span { class, "{label}" }
    }
}
