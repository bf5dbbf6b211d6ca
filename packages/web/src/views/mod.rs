use dioxus::prelude::*;
use ui::views::{AdminLayoutView, NavItem, PermissionsView, UsersView};

use crate::Route;

/// Layout route: sidebar navigation around the active page.
#[component]
pub fn AdminShell() -> Element {
    let nav = use_navigator();
    let active = match use_route::<Route>() {
        Route::Users {} => NavItem::Users,
        Route::Permissions {} => NavItem::Permissions,
    };

    rsx! {
        AdminLayoutView {
            active,
            on_navigate: move |item: NavItem| {
                let target = match item {
                    NavItem::Users => Route::Users {},
                    NavItem::Permissions => Route::Permissions {},
                };
                nav.push(target);
            },
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn Permissions() -> Element {
    rsx! { PermissionsView {} }
}
