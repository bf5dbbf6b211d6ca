//! # Entity abstraction shared by every managed resource
//!
//! An [`Entity`] is one record of a resource list (a user, a permission). The
//! trait carries everything the generic machinery needs to know about a record
//! type: the REST path segment it lives under, how to build it from a
//! validated [`Entity::Draft`], which fields the search box looks at, and which
//! validation [`Schema`] its form uses.
//!
//! Identifiers are [`EntityId`]s. Backends disagree on whether ids are numbers
//! or strings, so the id is serialised untagged and both shapes round-trip.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::form::{FieldValues, Schema};

/// Unique, immutable identifier of an entity within a store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl EntityId {
    /// The numeric value, if this is an integer id.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EntityId::Int(n) => Some(*n),
            EntityId::Str(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{n}"),
            EntityId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        EntityId::Int(i64::from(n))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Str(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Str(s)
    }
}

/// A record type managed by a resource manager.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Id-less body sent on create and update.
    type Draft: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + 'static;

    /// Path segment under `/api/`, also used in log lines.
    const RESOURCE: &'static str;

    /// Human label, e.g. `"User"`.
    const LABEL: &'static str;

    fn id(&self) -> &EntityId;

    /// Build a full entity from a draft and an id.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Existing fields overlaid with the submitted draft. The id and any
    /// fields unknown to the draft are kept.
    fn merge(&self, draft: &Self::Draft) -> Self;

    /// Field values the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Validation rules for this entity's form.
    fn schema() -> Schema;

    /// Build a draft from already-validated form values.
    fn draft_from_fields(fields: &FieldValues) -> Self::Draft;

    /// Current values, used to pre-fill the edit form.
    fn to_fields(&self) -> FieldValues;
}
