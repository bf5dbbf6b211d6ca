//! Platform slot selection for the local store snapshot.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorageSlot`]
//! - **Native**: one JSON file per key under the platform data dir via [`store::FileSlot`]
//! - **WASM without `web`**: in-memory, gone on reload

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformSlot = store::LocalStorageSlot;

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformSlot = store::MemorySlot;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSlot = store::FileSlot;

/// Create the slot for the current platform.
pub fn make_slot() -> PlatformSlot {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageSlot::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemorySlot::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileSlot::in_data_dir()
    }
}
