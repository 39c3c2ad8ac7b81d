//! Runtime configuration.
//!
//! ```toml
//! default_language = "ar"
//! fallback_language = "ar"
//! storage_key = "preferred-language"
//! locales_dir = "public/locales"
//! namespaces = ["common", "navigation", "forms"]
//! header_spacing_offset = 32.0
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::DEFAULT_SPACING_OFFSET;
use crate::locale::Language;
use crate::storage::PREFERRED_LANGUAGE_KEY;

/// Configuration of the localization runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Language used when no valid preference is persisted.
    pub default_language: String,
    /// Language consulted when a translation is missing.
    pub fallback_language: String,
    /// Preference key the active language is stored under.
    pub storage_key: String,
    /// Keep the language preference across restarts.
    pub persist_preferences: bool,
    /// Preferences file; defaults to the platform config directory.
    pub preferences_path: Option<PathBuf>,
    /// Directory of `<language>/<namespace>.json` bundles.
    pub locales_dir: Option<PathBuf>,
    /// Namespaces preloaded at startup.
    pub namespaces: Vec<String>,
    /// Gap added to the header height for `--header-spacing`, in pixels.
    pub header_spacing_offset: f32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            default_language: Language::DEFAULT.code().to_string(),
            fallback_language: Language::DEFAULT.code().to_string(),
            storage_key: PREFERRED_LANGUAGE_KEY.to_string(),
            persist_preferences: true,
            preferences_path: None,
            locales_dir: None,
            namespaces: ["common", "navigation", "forms", "documents", "admin"]
                .into_iter()
                .map(String::from)
                .collect(),
            header_spacing_offset: DEFAULT_SPACING_OFFSET,
        }
    }
}

impl HubConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: HubConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check every language field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_language()?;
        self.fallback_language()?;
        Ok(())
    }

    pub fn default_language(&self) -> Result<Language, ConfigError> {
        parse_language("default_language", &self.default_language)
    }

    pub fn fallback_language(&self) -> Result<Language, ConfigError> {
        parse_language("fallback_language", &self.fallback_language)
    }

    /// Where preferences are persisted, if anywhere.
    ///
    /// `None` when persistence is disabled or the platform has no config
    /// directory.
    pub fn resolved_preferences_path(&self) -> Option<PathBuf> {
        if !self.persist_preferences {
            return None;
        }
        self.preferences_path.clone().or_else(|| {
            ProjectDirs::from("org", "PlanHub", "planhub")
                .map(|dirs| dirs.config_dir().join("preferences.json"))
        })
    }
}

fn parse_language(field: &'static str, value: &str) -> Result<Language, ConfigError> {
    value
        .parse::<Language>()
        .map_err(|_| ConfigError::InvalidLanguage {
            field,
            value: value.to_string(),
        })
}
