//! In-memory preference store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use planhub_core::logging::targets;

use super::PreferenceStore;
use crate::error::StorageError;

/// In-memory preference store.
///
/// Values live as long as the store. Every successful write is counted,
/// which lets callers verify that a rejected operation never reached
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one value already present (not counted as a write).
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.write().insert(key.to_string(), value.to_string());
        store
    }

    /// Number of writes performed through [`PreferenceStore::set`].
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.write().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(target: targets::STORAGE, key, value, "preference stored in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("preferred-language"), None);

        prefs.set("preferred-language", "en").unwrap();
        assert_eq!(prefs.get("preferred-language").as_deref(), Some("en"));
        assert_eq!(prefs.write_count(), 1);
    }

    #[test]
    fn test_seeded_value_is_not_a_write() {
        let prefs = MemoryPreferences::with_value("preferred-language", "ar");
        assert_eq!(prefs.get("preferred-language").as_deref(), Some("ar"));
        assert_eq!(prefs.write_count(), 0);
    }
}
