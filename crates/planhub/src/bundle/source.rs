//! Where translation bundles come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::BundleError;
use crate::locale::Language;

/// Translated strings of one language and one namespace, keyed by
/// dot-separated path (`nav.documents.title`).
pub type Bundle = HashMap<String, String>;

/// Loads bundles by `(language, namespace)`.
pub trait BundleSource: Send + Sync {
    /// Load a bundle. `Ok(None)` means the bundle does not exist.
    fn load(&self, language: Language, namespace: &str) -> Result<Option<Bundle>, BundleError>;
}

/// Bundles held in memory, typically compiled in or built by tests.
#[derive(Debug, Default)]
pub struct MemoryBundles {
    bundles: HashMap<(Language, String), Bundle>,
}

impl MemoryBundles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle from a nested JSON object.
    pub fn insert_json(&mut self, language: Language, namespace: &str, value: &Value) {
        self.bundles
            .insert((language, namespace.to_string()), flatten(value));
    }

    /// Builder form of [`insert_json`](Self::insert_json).
    pub fn with_json(mut self, language: Language, namespace: &str, value: Value) -> Self {
        self.insert_json(language, namespace, &value);
        self
    }
}

impl BundleSource for MemoryBundles {
    fn load(&self, language: Language, namespace: &str) -> Result<Option<Bundle>, BundleError> {
        Ok(self.bundles.get(&(language, namespace.to_string())).cloned())
    }
}

/// Bundles stored as `<root>/<language>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirBundles {
    root: PathBuf,
}

impl JsonDirBundles {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding a bundle.
    pub fn bundle_path(&self, language: Language, namespace: &str) -> PathBuf {
        self.root
            .join(language.code())
            .join(format!("{namespace}.json"))
    }
}

impl BundleSource for JsonDirBundles {
    fn load(&self, language: Language, namespace: &str) -> Result<Option<Bundle>, BundleError> {
        let path = self.bundle_path(language, namespace);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(BundleError::Io { path, source }),
        };

        let value: Value = serde_json::from_str(&content)
            .map_err(|source| BundleError::Malformed { path, source })?;
        Ok(Some(flatten(&value)))
    }
}

/// Flatten nested JSON into dot-separated keys.
///
/// Strings are kept, numbers and booleans are rendered; nulls and arrays
/// carry no translatable text and are skipped.
pub fn flatten(value: &Value) -> Bundle {
    let mut bundle = Bundle::new();
    flatten_into(value, String::new(), &mut bundle);
    bundle
}

fn flatten_into(value: &Value, prefix: String, out: &mut Bundle) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, path, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            out.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix, b.to_string());
        }
        Value::Null | Value::Array(_) => {}
    }
}
