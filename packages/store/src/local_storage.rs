//! # Browser `localStorage` slot
//!
//! [`LocalStorageSlot`] is the [`PersistentSlot`] used on the web platform.
//! Each key maps directly to a `localStorage` item, so the user snapshot lives
//! under `"users"` exactly like the page always stored it. An optional
//! namespace prefixes keys (`"<namespace>:users"`) to keep several consoles on
//! one origin apart.
//!
//! `localStorage` is synchronous; the async signatures only satisfy the trait.
//! A missing `window` or disabled storage surfaces as
//! [`ResourceError::Storage`].

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::ResourceError;
use crate::slot::PersistentSlot;

#[derive(Clone, Debug, Default)]
pub struct LocalStorageSlot {
    prefix: Option<String>,
}

impl LocalStorageSlot {
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// - `Some("tenant")` → keys `"tenant:<key>"`
    /// - `None` → bare keys
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            prefix: namespace.map(|ns| format!("{ns}:")),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}{key}"),
            None => key.to_string(),
        }
    }

    fn storage(&self) -> Result<Storage, ResourceError> {
        let window = web_sys::window()
            .ok_or_else(|| ResourceError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| ResourceError::Storage("localStorage unavailable".to_string()))
    }
}

fn js_err(value: JsValue) -> ResourceError {
    ResourceError::Storage(format!("{value:?}"))
}

impl PersistentSlot for LocalStorageSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, ResourceError> {
        self.storage()?.get_item(&self.full_key(key)).map_err(js_err)
    }

    async fn write(&self, key: &str, value: String) -> Result<(), ResourceError> {
        self.storage()?
            .set_item(&self.full_key(key), &value)
            .map_err(js_err)
    }

    async fn clear(&self, key: &str) -> Result<(), ResourceError> {
        self.storage()?.remove_item(&self.full_key(key)).map_err(js_err)
    }
}
