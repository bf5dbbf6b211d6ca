//! # Console configuration: `admin.toml`
//!
//! Defines the TOML file that tells the console where the REST backend lives
//! and how each resource page keeps its data
//! (filename: [`AdminConfig::filename`] = `"admin.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:4000"
//!
//! [mutations]
//! policy = "pessimistic"        # or "optimistic"; applies to every resource
//!
//! [users]
//! slot_key = "users"            # omit to keep users in memory only
//! write_mode = "local_only"     # or "remote"
//! validation = "on_blur"        # or "on_change"
//!
//! [permissions]
//! write_mode = "remote"
//! validation = "on_change"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AdminConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL; resources live under `<base_url>/api/<resource>`. |
//! | [`MutationConfig`] | The single [`MutationPolicy`] shared by all resources. |
//! | [`ResourceConfig`] | Per-resource slot key, [`WriteMode`] and [`ValidationMode`]. |
//!
//! A missing section takes the defaults shown above, so an empty file is the
//! default configuration.

use serde::{Deserialize, Serialize};

use crate::form::ValidationMode;
use crate::mutator::{MutationPolicy, WriteMode};

/// Top-level configuration stored in `admin.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mutations: MutationConfig,
    #[serde(default = "ResourceConfig::users")]
    pub users: ResourceConfig,
    #[serde(default = "ResourceConfig::permissions")]
    pub permissions: ResourceConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            mutations: MutationConfig::default(),
            users: ResourceConfig::users(),
            permissions: ResourceConfig::permissions(),
        }
    }
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    #[serde(default)]
    pub policy: MutationPolicy,
}

/// How one resource page stores and validates its records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Persistent slot key; `None` disables the local snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_key: Option<String>,
    #[serde(default)]
    pub write_mode: WriteMode,
    #[serde(default)]
    pub validation: ValidationMode,
}

impl ResourceConfig {
    /// Users: local snapshot under `"users"`, edits stay local, validate on blur.
    pub fn users() -> Self {
        Self {
            slot_key: Some("users".to_string()),
            write_mode: WriteMode::LocalOnly,
            validation: ValidationMode::OnBlur,
        }
    }

    /// Permissions: no snapshot, every edit goes to the backend.
    pub fn permissions() -> Self {
        Self {
            slot_key: None,
            write_mode: WriteMode::Remote,
            validation: ValidationMode::OnChange,
        }
    }
}

impl AdminConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "admin.toml"
    }

    /// Builder method to set the backend URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Builder method to set the shared mutation policy.
    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutations.policy = policy;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AdminConfig::from_toml("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.users.slot_key.as_deref(), Some("users"));
        assert_eq!(config.users.write_mode, WriteMode::LocalOnly);
        assert_eq!(config.permissions.write_mode, WriteMode::Remote);
        assert_eq!(config.mutations.policy, MutationPolicy::Pessimistic);
    }

    #[test]
    fn test_parse_overrides() {
        let config = AdminConfig::from_toml(
            r#"
            [api]
            base_url = "https://admin.example.com"

            [mutations]
            policy = "optimistic"

            [users]
            write_mode = "remote"
            validation = "on_change"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.mutations.policy, MutationPolicy::Optimistic);
        assert_eq!(config.users.write_mode, WriteMode::Remote);
        // a present section without slot_key means no snapshot
        assert_eq!(config.users.slot_key, None);
        assert_eq!(config.permissions, ResourceConfig::permissions());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AdminConfig::default()
            .with_base_url("http://10.0.0.2:4000")
            .with_policy(MutationPolicy::Optimistic);
        let text = config.to_toml().unwrap();
        assert_eq!(AdminConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(AdminConfig::from_toml("[mutations]\npolicy = \"eventual\"").is_err());
    }
}
