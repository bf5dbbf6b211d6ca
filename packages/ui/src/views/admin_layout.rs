use dioxus::prelude::*;

use crate::icons::{FaBars, FaLock, FaUser};
use crate::{Icon, Navbar, NotificationPanel, NotificationToggle};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Sidebar destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavItem {
    Users,
    Permissions,
}

impl NavItem {
    pub const ALL: [NavItem; 2] = [NavItem::Users, NavItem::Permissions];

    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Users => "Users",
            NavItem::Permissions => "Permissions",
        }
    }
}

/// Shared admin layout: collapsible sidebar, header bar, notification panel.
///
/// Platform packages map [`NavItem`]s to their routes and pass the router
/// outlet as children.
#[component]
pub fn AdminLayoutView(
    /// Currently active destination, highlighted in the sidebar.
    active: NavItem,
    /// The router outlet for child routes.
    children: Element,
    on_navigate: EventHandler<NavItem>,
) -> Element {
    let mut collapsed = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "admin-layout",
            aside {
                class: if collapsed() { "admin-sider collapsed" } else { "admin-sider" },
                h4 { class: "admin-brand", if collapsed() { "R" } else { "RBAC" } }
                nav {
                    class: "admin-menu",
                    for item in NavItem::ALL {
                        button {
                            key: "{item.label()}",
                            class: if item == active { "admin-menu-item active" } else { "admin-menu-item" },
                            title: item.label(),
                            onclick: move |_| on_navigate.call(item),
                            {nav_icon(item)}
                            if !collapsed() {
                                span { "{item.label()}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "admin-main",
                Navbar {
                    button {
                        class: "sider-trigger",
                        title: if collapsed() { "Expand menu" } else { "Collapse menu" },
                        onclick: move |_| {
                            let open = collapsed();
                            collapsed.set(!open);
                        },
                        Icon { icon: FaBars, width: 16, height: 16 }
                    }
                    NotificationToggle {}
                }

                main {
                    class: "admin-content",
                    {children}
                }

                NotificationPanel {}
            }
        }
    }
}

fn nav_icon(item: NavItem) -> Element {
    match item {
        NavItem::Users => rsx! { Icon { icon: FaUser, width: 16, height: 16 } },
        NavItem::Permissions => rsx! { Icon { icon: FaLock, width: 16, height: 16 } },
    }
}
