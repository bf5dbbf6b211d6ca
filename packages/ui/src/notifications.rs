//! Session notification log shared by every page through context.
//!
//! Entries keep the resource that raised them and can be dismissed one by
//! one. An error opens the panel; opening it marks everything as seen.

use dioxus::prelude::*;
use store::{Notice, NoticeLevel};

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationEntry {
    pub id: u64,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub level: NoticeLevel,
    pub source: Option<&'static str>,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    entries: Vec<NotificationEntry>,
    next_id: u64,
    unseen: usize,
    visible: bool,
}

impl NotificationLog {
    pub fn push(&mut self, notice: Notice, timestamp: String) {
        if notice.level == NoticeLevel::Error {
            self.set_visible(true);
        }
        if !self.visible {
            self.unseen += 1;
        }
        self.next_id += 1;
        self.entries.push(NotificationEntry {
            id: self.next_id,
            timestamp,
            level: notice.level,
            source: notice.source,
            message: notice.message,
        });
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter().rev()
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.unseen = 0;
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.level == NoticeLevel::Error)
            .count()
    }

    /// Entries that arrived while the panel was closed.
    pub fn unseen(&self) -> usize {
        self.unseen
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.unseen = 0;
        }
    }
}

pub fn use_notifications() -> Signal<NotificationLog> {
    use_context::<Signal<NotificationLog>>()
}

/// Append a notice stamped with the local time.
pub fn notify(log: &mut Signal<NotificationLog>, notice: Notice) {
    let timestamp = current_time();
    log.write().push(notice, timestamp);
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(notices: Vec<Notice>) -> NotificationLog {
        let mut log = NotificationLog::default();
        for notice in notices {
            log.push(notice, "12:00:00".to_string());
        }
        log
    }

    #[test]
    fn test_errors_open_the_panel() {
        let mut log = log_with(vec![Notice::success("User created").with_source("User")]);
        assert!(!log.is_visible());
        assert_eq!(log.unseen(), 1);

        log.push(
            Notice::error("Failed to load Permission").with_source("Permission"),
            String::new(),
        );
        assert!(log.is_visible());
        assert_eq!(log.unseen(), 0);
        assert_eq!(log.error_count(), 1);

        let sources: Vec<_> = log.entries().map(|e| e.source).collect();
        assert_eq!(sources, [Some("Permission"), Some("User")]);
    }

    #[test]
    fn test_dismiss_one_entry() {
        let mut log = log_with(vec![
            Notice::success("User created"),
            Notice::error("Failed to delete User"),
            Notice::success("User updated"),
        ]);
        let failed = log
            .entries()
            .find(|e| e.level == NoticeLevel::Error)
            .map(|e| e.id)
            .unwrap();
        log.dismiss(failed);

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["User updated", "User created"]);
        assert_eq!(log.error_count(), 0);
    }

    #[test]
    fn test_opening_marks_seen() {
        let mut log = log_with(vec![Notice::success("a"), Notice::success("b")]);
        assert_eq!(log.unseen(), 2);
        log.set_visible(true);
        assert_eq!(log.unseen(), 0);
        log.push(Notice::success("c"), String::new());
        assert_eq!(log.unseen(), 0);

        log.clear();
        assert_eq!(log.entries().count(), 0);
    }

    #[test]
    fn test_timestamp_is_wall_clock() {
        let stamp = current_time();
        assert!(chrono::NaiveTime::parse_from_str(&stamp, "%H:%M:%S").is_ok(), "{stamp}");
    }
}
