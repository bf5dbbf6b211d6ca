pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod form;
pub mod manager;
pub mod models;
pub mod mutator;
pub mod notice;
pub mod pipeline;
pub mod remote;
pub mod slot;

mod memory;
pub use memory::{MemoryRemote, MemorySlot};

mod file_slot;
pub use file_slot::FileSlot;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageSlot;

pub use collection::{EntityStore, StoreAccess};
pub use config::{AdminConfig, ApiConfig, ResourceConfig};
pub use entity::{Entity, EntityId};
pub use error::ResourceError;
pub use fetcher::{Fetcher, LoadSource};
pub use form::{FieldErrors, FieldValues, FormController, Submission, ValidationMode};
pub use manager::ResourceManager;
pub use models::{Permission, PermissionDraft, Role, Status, User, UserDraft};
pub use mutator::{MutationPolicy, Mutator, WriteMode};
pub use notice::{Notice, NoticeLevel, Notices};
pub use pipeline::{LoadState, Loaded, Outcome, Pipeline};
pub use remote::Remote;
pub use slot::{PersistentSlot, SnapshotSlot};
