//! JSON file preference store.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use planhub_core::logging::targets;
use planhub_core::Signal;
use serde_json::{Map, Value};

use super::PreferenceStore;
use crate::error::StorageError;

/// Preference store backed by a flat JSON object file.
///
/// The file is read once on [`open`](Self::open) and rewritten atomically
/// (temporary file in the same directory, then rename) on every write. Keys
/// this store does not understand are preserved untouched; only string
/// values are returned by [`get`](PreferenceStore::get).
pub struct JsonFilePreferences {
    path: PathBuf,
    data: RwLock<Map<String, Value>>,
    /// Emitted with the key after a value was written to disk.
    changed: Arc<Signal<String>>,
}

impl JsonFilePreferences {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StorageError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StorageError::io(&path, e)),
        };

        tracing::debug!(
            target: targets::STORAGE,
            path = %path.display(),
            keys = data.len(),
            "opened preferences file"
        );

        Ok(Self {
            path,
            data: RwLock::new(data),
            changed: Arc::new(Signal::new()),
        })
    }

    /// Opens the store at `path`, starting empty when the file is malformed.
    ///
    /// The unreadable content is left on disk until the next write replaces
    /// it. I/O errors other than a missing file are still returned.
    pub fn open_or_reset(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        match Self::open(path) {
            Err(StorageError::Malformed { source, .. }) => {
                tracing::warn!(
                    target: targets::STORAGE,
                    path = %path.display(),
                    error = %source,
                    "ignoring malformed preferences file"
                );
                Ok(Self {
                    path: path.to_path_buf(),
                    data: RwLock::new(Map::new()),
                    changed: Arc::new(Signal::new()),
                })
            }
            result => result,
        }
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Signal emitted with the key of every persisted write.
    pub fn changed(&self) -> &Arc<Signal<String>> {
        &self.changed
    }

    fn write_file(&self, data: &Map<String, Value>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(data).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;

        let mut temp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| StorageError::io(&dir, e))?;
        temp.write_all(json.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| StorageError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        {
            let mut data = self.data.write();
            let mut next = data.clone();
            next.insert(key.to_string(), Value::String(value.to_string()));

            // Memory only follows a successful write.
            self.write_file(&next)?;
            *data = next;
        }

        tracing::debug!(
            target: targets::STORAGE,
            key,
            value,
            path = %self.path.display(),
            "preference persisted"
        );
        self.changed.emit(key.to_string());
        Ok(())
    }
}
