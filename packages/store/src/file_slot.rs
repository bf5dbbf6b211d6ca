//! # Filesystem-backed persistent slot
//!
//! [`FileSlot`] is a [`PersistentSlot`] that keeps each key in its own JSON
//! file. It is the native counterpart of the browser's `localStorage` and is
//! what the console uses when it runs outside a browser.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── users.json
//! └── permissions.json
//! ```
//!
//! ## Platform data directories
//!
//! [`FileSlot::in_data_dir`] resolves the base via [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/admin-console/` |
//! | Linux | `~/.local/share/admin-console/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\admin-console\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ResourceError;
use crate::slot::PersistentSlot;

const APP_DIR: &str = "admin-console";

/// Filesystem-backed slot for native platforms.
#[derive(Clone, Debug)]
pub struct FileSlot {
    base: PathBuf,
}

impl FileSlot {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Slot under the platform data directory (current dir if unknown).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

fn storage_err(path: &Path, err: std::io::Error) -> ResourceError {
    ResourceError::Storage(format!("{}: {err}", path.display()))
}

impl PersistentSlot for FileSlot {
    async fn read(&self, key: &str) -> Result<Option<String>, ResourceError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(&path, e)),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<(), ResourceError> {
        let path = self.key_path(key);
        std::fs::create_dir_all(&self.base).map_err(|e| storage_err(&self.base, e))?;
        std::fs::write(&path, value).map_err(|e| storage_err(&path, e))
    }

    async fn clear(&self, key: &str) -> Result<(), ResourceError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(storage_err(&path, e)),
            _ => Ok(()),
        }
    }
}
