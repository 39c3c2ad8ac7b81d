//! CSS variables (custom properties) support.
//!
//! [`StyleVariables`] is the global set of custom properties the runtime
//! publishes for stylesheets, e.g. `--header-height`. Names may be given with
//! or without the leading `--`; they are stored without it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use planhub_core::logging::targets;
use planhub_core::Signal;

use crate::error::{Error, Result};

/// CSS custom properties (variables).
///
/// The store is internally synchronized; share it as [`SharedStyleVariables`].
pub struct StyleVariables {
    variables: RwLock<HashMap<String, String>>,
    /// Emitted with the `--name` of a variable after its value changed or it
    /// was removed.
    changed: Signal<String>,
}

/// A shared, reference-counted set of style variables.
pub type SharedStyleVariables = Arc<StyleVariables>;

impl Default for StyleVariables {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleVariables {
    /// Create empty variables.
    pub fn new() -> Self {
        Self {
            variables: RwLock::new(HashMap::new()),
            changed: Signal::new(),
        }
    }

    /// Create an empty shared store.
    pub fn shared() -> SharedStyleVariables {
        Arc::new(Self::new())
    }

    /// Signal emitted with the `--name` of every variable that changed.
    pub fn changed(&self) -> &Signal<String> {
        &self.changed
    }

    /// Set a variable, returning whether its value changed.
    pub fn set(&self, name: &str, value: impl Into<String>) -> Result<bool> {
        let name = normalize(name)?;
        let value = value.into();

        let changed = {
            let mut vars = self.variables.write();
            if vars.get(name).map(String::as_str) == Some(value.as_str()) {
                false
            } else {
                tracing::trace!(target: targets::STYLE, name, value = %value, "style variable set");
                vars.insert(name.to_string(), value);
                true
            }
        };

        if changed {
            self.changed.emit(format!("--{name}"));
        }
        Ok(changed)
    }

    /// Get a variable value.
    pub fn get(&self, name: &str) -> Option<String> {
        let name = name.strip_prefix("--").unwrap_or(name);
        self.variables.read().get(name).cloned()
    }

    /// Check if a variable exists.
    pub fn contains(&self, name: &str) -> bool {
        let name = name.strip_prefix("--").unwrap_or(name);
        self.variables.read().contains_key(name)
    }

    /// Remove a variable, returning its last value.
    pub fn remove(&self, name: &str) -> Option<String> {
        let name = name.strip_prefix("--").unwrap_or(name);
        let removed = self.variables.write().remove(name);
        if removed.is_some() {
            self.changed.emit(format!("--{name}"));
        }
        removed
    }

    /// Snapshot of all variables, sorted by name.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.variables
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.read().len()
    }

    /// Returns true if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.variables.read().is_empty()
    }

    /// Render the variables as a `:root` rule for a host stylesheet.
    pub fn to_root_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.snapshot() {
            css.push_str(&format!("  --{name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

/// Format a pixel length the way CSS expects it (`96px`, `64.5px`).
///
/// Callers are expected to pass finite values.
pub fn format_px(value: f32) -> String {
    format!("{value}px")
}

fn normalize(name: &str) -> Result<&str> {
    let bare = name.strip_prefix("--").unwrap_or(name);
    let valid = !bare.is_empty()
        && bare
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(bare)
    } else {
        Err(Error::invalid_variable_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_variables_set_get() {
        let vars = StyleVariables::new();
        assert_eq!(vars.set("header-height", "64px"), Ok(true));

        assert_eq!(vars.get("header-height").as_deref(), Some("64px"));
        assert_eq!(vars.get("--header-height").as_deref(), Some("64px"));
        assert!(vars.contains("--header-height"));
    }

    #[test]
    fn test_set_same_value_is_not_a_change() {
        let vars = StyleVariables::new();
        assert_eq!(vars.set("--header-spacing", "96px"), Ok(true));
        assert_eq!(vars.set("header-spacing", "96px"), Ok(false));
        assert_eq!(vars.set("header-spacing", "128px"), Ok(true));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let vars = StyleVariables::new();
        assert!(vars.set("--", "1px").is_err());
        assert!(vars.set("", "1px").is_err());
        assert_eq!(
            vars.set("header height", "1px"),
            Err(Error::invalid_variable_name("header height"))
        );
        assert!(vars.is_empty());
    }

    #[test]
    fn test_changed_signal() {
        let vars = StyleVariables::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        vars.changed().connect(move |name| seen_clone.lock().push(name.clone()));

        vars.set("header-height", "64px").unwrap();
        vars.set("header-height", "64px").unwrap();
        vars.remove("header-height");
        vars.remove("header-height");

        assert_eq!(*seen.lock(), vec!["--header-height", "--header-height"]);
    }

    #[test]
    fn test_slot_may_read_variables() {
        let vars = StyleVariables::shared();
        let observed = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&vars);
        let observed_clone = observed.clone();
        vars.changed().connect(move |name| {
            if let Some(vars) = weak.upgrade() {
                *observed_clone.lock() = vars.get(name);
            }
        });

        vars.set("header-height", "96px").unwrap();
        assert_eq!(observed.lock().as_deref(), Some("96px"));
    }

    #[test]
    fn test_root_block_sorted() {
        let vars = StyleVariables::new();
        vars.set("header-spacing", "96px").unwrap();
        vars.set("header-height", "64px").unwrap();

        assert_eq!(
            vars.to_root_block(),
            ":root {\n  --header-height: 64px;\n  --header-spacing: 96px;\n}"
        );
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(96.0), "96px");
        assert_eq!(format_px(0.0), "0px");
        assert_eq!(format_px(64.5), "64.5px");
        assert_eq!(format_px(1e10), "10000000000px");
    }
}
