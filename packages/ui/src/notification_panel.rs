use dioxus::prelude::*;
use store::NoticeLevel;

use crate::icons::{
    FaBell, FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaTriangleExclamation, FaXmark,
};
use crate::notifications::{use_notifications, NotificationEntry};
use crate::Icon;

const NOTIFICATIONS_CSS: Asset = asset!("/assets/styling/notifications.css");

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "notification-entry error",
        NoticeLevel::Warning => "notification-entry warning",
        NoticeLevel::Success => "notification-entry success",
        NoticeLevel::Info => "notification-entry info",
    }
}

fn level_icon(level: NoticeLevel) -> Element {
    match level {
        NoticeLevel::Error => rsx! { Icon { icon: FaCircleExclamation, width: 12, height: 12 } },
        NoticeLevel::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 12, height: 12 } },
        NoticeLevel::Success => rsx! { Icon { icon: FaCircleCheck, width: 12, height: 12 } },
        NoticeLevel::Info => rsx! { Icon { icon: FaCircleInfo, width: 12, height: 12 } },
    }
}

/// Notices raised on any page, newest first, each tagged with its resource.
#[component]
pub fn NotificationPanel() -> Element {
    let mut log = use_notifications();

    if !log.read().is_visible() {
        return rsx! {};
    }

    let entries: Vec<NotificationEntry> = log.read().entries().cloned().collect();
    let errors = log.read().error_count();
    let empty = entries.is_empty();

    rsx! {
        document::Stylesheet { href: NOTIFICATIONS_CSS }

        aside {
            class: "notification-panel",
            header {
                class: "notification-header",
                span { "Notifications" }
                if errors > 0 {
                    span { class: "notification-error-count", "{errors} failed" }
                }
                button {
                    class: "notification-clear",
                    disabled: empty,
                    onclick: move |_| log.write().clear(),
                    "Clear all"
                }
                button {
                    class: "notification-close",
                    title: "Hide",
                    onclick: move |_| log.write().set_visible(false),
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
            ul {
                class: "notification-entries",
                if empty {
                    li { class: "notification-empty", "No notifications" }
                }
                for entry in entries {
                    li {
                        key: "{entry.id}",
                        class: level_class(entry.level),
                        {level_icon(entry.level)}
                        div {
                            class: "notification-body",
                            {entry.source.map(|source| rsx! {
                                span { class: "notification-source", "{source}" }
                            })}
                            span { class: "notification-message", "{entry.message}" }
                            time { class: "notification-time", "{entry.timestamp}" }
                        }
                        button {
                            class: "notification-dismiss",
                            title: "Dismiss",
                            onclick: move |_| log.write().dismiss(entry.id),
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
            }
        }
    }
}

/// Bell button: unseen count, red while the log holds failures.
#[component]
pub fn NotificationToggle() -> Element {
    let mut log = use_notifications();
    let unseen = log.read().unseen();
    let failing = log.read().error_count() > 0;

    rsx! {
        button {
            class: if failing { "notification-toggle has-errors" } else { "notification-toggle" },
            title: "Notifications",
            onclick: move |_| {
                let visible = log.read().is_visible();
                log.write().set_visible(!visible);
            },
            Icon { icon: FaBell, width: 14, height: 14 }
            if unseen > 0 {
                span { class: "notification-count", "{unseen}" }
            }
        }
    }
}
