//! Persisted preference stores.
//!
//! The language store keeps its only durable state behind the
//! [`PreferenceStore`] key-value interface. Two stores ship with the crate:
//!
//! - [`MemoryPreferences`]: session-only, also used by tests
//! - [`JsonFilePreferences`]: a flat JSON object on disk, written atomically

mod json_file;
mod memory;

use std::sync::Arc;

pub use json_file::JsonFilePreferences;
pub use memory::MemoryPreferences;

use crate::error::StorageError;

/// Key under which the active interface language is persisted.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferred-language";

/// A string key-value store that survives reloads.
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `None` when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A shared preference store.
pub type SharedPreferences = Arc<dyn PreferenceStore>;
