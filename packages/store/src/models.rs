//! # Domain models for the admin console
//!
//! The two managed record types and their drafts:
//!
//! | Entity | Draft | Searchable fields |
//! |--------|-------|-------------------|
//! | [`User`] | [`UserDraft`] | name, email, role, status |
//! | [`Permission`] | [`PermissionDraft`] | name, code |
//!
//! [`Role`] and [`Status`] are open enums: the well-known values get their
//! own variant (and badge colour in the UI), anything else typed into the form
//! or sent by the backend is kept verbatim in `Other`.
//!
//! Both entities carry an `extra` map of JSON fields they do not model. The
//! backend may send more than the form edits; those fields survive updates and
//! the local snapshot round-trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::form::{FieldRule, FieldValues, Format, Schema};

/// User role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Guest,
    User,
    Other(String),
}

impl Role {
    /// Case-insensitive parse; unknown text becomes `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "guest" => Role::Guest,
            "user" => Role::User,
            _ => Role::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
            Role::User => "user",
            Role::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Active,
    Inactive,
    Other(String),
}

impl Status {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => Status::Active,
            "inactive" => Status::Inactive,
            _ => Status::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(
        id: impl Into<EntityId>,
        name: &str,
        email: &str,
        role: Role,
        status: Status,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            extra: Map::new(),
        }
    }
}

/// Body of a user create/update request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
}

impl Entity for User {
    type Draft = UserDraft;

    const RESOURCE: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            extra: Map::new(),
        }
    }

    fn merge(&self, draft: &UserDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role.clone(),
            status: draft.status.clone(),
            extra: self.extra.clone(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
            self.status.as_str(),
        ]
    }

    fn schema() -> Schema {
        Schema::new(vec![
            FieldRule::new("name", "Name").required("Name is required"),
            FieldRule::new("role", "Role").required("Role is required"),
            FieldRule::new("status", "Status").required("Status is required"),
            FieldRule::new("email", "Email")
                .required("Email is required")
                .format(Format::Email, "Invalid email format"),
        ])
    }

    fn draft_from_fields(fields: &FieldValues) -> UserDraft {
        let get = |k: &str| fields.get(k).cloned().unwrap_or_default();
        UserDraft {
            name: get("name"),
            email: get("email"),
            role: Role::parse(&get("role")),
            status: Status::parse(&get("status")),
        }
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("role".to_string(), self.role.to_string()),
            ("status".to_string(), self.status.to_string()),
        ])
    }
}

/// A named permission code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl Permission {
    pub fn new(id: impl Into<EntityId>, name: &str, code: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            code: code.to_string(),
            extra: Map::new(),
        }
    }
}

/// Body of a permission create/update request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermissionDraft {
    pub name: String,
    pub code: String,
}

impl Entity for Permission {
    type Draft = PermissionDraft;

    const RESOURCE: &'static str = "permissions";
    const LABEL: &'static str = "Permission";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: PermissionDraft) -> Self {
        Self {
            id,
            name: draft.name,
            code: draft.code,
            extra: Map::new(),
        }
    }

    fn merge(&self, draft: &PermissionDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            code: draft.code.clone(),
            extra: self.extra.clone(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }

    fn schema() -> Schema {
        Schema::new(vec![
            FieldRule::new("name", "Permission Name").required("Permission Name is required"),
            FieldRule::new("code", "Permission Code").required("Permission Code is required"),
        ])
    }

    fn draft_from_fields(fields: &FieldValues) -> PermissionDraft {
        PermissionDraft {
            name: fields.get("name").cloned().unwrap_or_default(),
            code: fields.get("code").cloned().unwrap_or_default(),
        }
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::from([
            ("name".to_string(), self.name.clone()),
            ("code".to_string(), self.code.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse(" Guest "), Role::Guest);
        assert_eq!(Role::parse("Auditor"), Role::Other("Auditor".to_string()));
        assert_eq!(Status::parse("InActive"), Status::Inactive);
    }

    #[test]
    fn test_user_json_shape() {
        let json = r#"{"id":1,"name":"Alice","email":"a@x.com","role":"Admin","status":"active"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.extra.is_empty());

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], "admin");
        assert_eq!(back["id"], 1);
    }

    #[test]
    fn test_merge_keeps_unknown_fields() {
        let json = r#"{"id":"p1","name":"Read","code":"read","access":"all"}"#;
        let perm: Permission = serde_json::from_str(json).unwrap();
        assert_eq!(perm.extra["access"], "all");

        let merged = perm.merge(&PermissionDraft {
            name: "Read all".to_string(),
            code: "read".to_string(),
        });
        assert_eq!(merged.id, EntityId::from("p1"));
        assert_eq!(merged.name, "Read all");
        assert_eq!(merged.extra["access"], "all");
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let draft = UserDraft {
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
            role: Role::Guest,
            status: Status::Active,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["role"], "guest");
    }
}
