//! PlanHub - bilingual (Arabic/English) localization runtime.
//!
//! This is the main umbrella crate. It re-exports the reactive primitives of
//! `planhub-core` and the direction/variable layer of `planhub-style`, and
//! adds the pieces the rendering layer talks to:
//!
//! - [`locale`]: the persisted language store and provider-scoped hooks
//! - [`layout`]: header height synchronization into style variables
//! - [`boundary`]: render-failure containment with a localized fallback
//! - [`bundle`]: namespaced translation bundles
//! - [`LocalizationRuntime`]: all of the above wired from a [`HubConfig`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use planhub::locale::{use_rtl, Language, LanguageProvider, LanguageStore};
//! use planhub::storage::{MemoryPreferences, PREFERRED_LANGUAGE_KEY};
//!
//! let prefs = Arc::new(MemoryPreferences::with_value(PREFERRED_LANGUAGE_KEY, "en"));
//! let store = LanguageStore::init(prefs, PREFERRED_LANGUAGE_KEY);
//! let provider = LanguageProvider::new(Arc::new(store));
//!
//! provider.provide(|| {
//!     assert!(!use_rtl().unwrap());
//!     provider.store().set_language(Language::Ar).unwrap();
//!     assert!(use_rtl().unwrap());
//! });
//!
//! // Outside a provider the hooks refuse to guess.
//! assert!(use_rtl().unwrap_err().is_context_missing());
//! ```

pub use planhub_core::*;

/// Direction and style variable layer.
pub mod style {
    pub use planhub_style::*;
}

pub mod boundary;
pub mod bundle;
pub mod config;
pub mod layout;
pub mod locale;
pub mod storage;

mod error;
mod runtime;

pub use config::HubConfig;
pub use error::{BundleError, ConfigError, LocaleError, Result, StorageError};
pub use runtime::{DocumentAttributes, LocalizationRuntime};
