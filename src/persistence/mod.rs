//! Persistence of small JSON records
//!
//! The game stores exactly two records: the session (score + collection) and
//! the settings. Both go through [`KeyValueStore`], so the browser's
//! LocalStorage, a directory on disk and an in-memory map are interchangeable.

pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;
