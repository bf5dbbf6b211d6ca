//! Error taxonomy shared by the fetcher, mutator and slots.

use crate::entity::EntityId;
use crate::form::FieldErrors;

/// Failure of a resource operation. None of these end the session: the UI
/// turns them into notices or inline field messages.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The remote request failed (transport, status, or unreadable body).
    #[error("network error: {0}")]
    Network(String),

    /// One or more form fields violate the schema.
    #[error("validation failed on {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),

    #[error("no entity with id {0}")]
    NotFound(EntityId),

    #[error("an entity with id {0} already exists")]
    DuplicateId(EntityId),

    /// The persistent slot could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResourceError {
    pub fn is_network(&self) -> bool {
        matches!(self, ResourceError::Network(_))
    }
}
