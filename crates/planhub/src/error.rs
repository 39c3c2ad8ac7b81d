//! Error types for the localization runtime.

use std::path::PathBuf;

/// Result type alias for language store and provider operations.
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Errors raised by the language store and its consumer hooks.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// A consumer hook was called outside every `LanguageProvider` scope.
    #[error("{hook}() must be called inside a LanguageProvider scope")]
    ContextMissing { hook: &'static str },

    /// The language code is not one of the supported languages.
    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    /// Persisting the preference failed; the active language is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LocaleError {
    /// Returns true if this error is a missing provider.
    pub fn is_context_missing(&self) -> bool {
        matches!(self, Self::ContextMissing { .. })
    }

    /// Returns true if this error is an unsupported language code.
    pub fn is_unsupported_language(&self) -> bool {
        matches!(self, Self::UnsupportedLanguage(_))
    }
}

/// Errors raised by preference stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the preferences file failed.
    #[error("Failed to access preferences file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences file is not a JSON object.
    #[error("Malformed preferences file '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store refused the write.
    #[error("Preference store rejected '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

impl StorageError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading translation bundles.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// Reading a bundle file failed.
    #[error("Failed to read bundle '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundle file is not valid JSON.
    #[error("Malformed bundle '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading configuration or bootstrapping the runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for `HubConfig`.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A language field names an unsupported language.
    #[error("Invalid language '{value}' for '{field}'")]
    InvalidLanguage { field: &'static str, value: String },

    /// The preference store could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
