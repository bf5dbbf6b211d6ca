//! User-visible notifications raised by resource operations.

use crate::error::ResourceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Label of the resource that raised it, when there is one.
    pub source: Option<&'static str>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, label: &'static str) -> Self {
        self.source = Some(label);
        self
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Error notice for a failed `action`, e.g. "Failed to delete User: ...".
    pub fn failed(action: &str, label: &'static str, err: &ResourceError) -> Self {
        Self::error(format!("Failed to {action} {label}: {err}")).with_source(label)
    }
}

/// FIFO queue of pending notices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    entries: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.entries.push(notice);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|n| n.level == NoticeLevel::Error)
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.entries)
    }
}
