//! The session-wide language store.

use std::sync::Arc;

use parking_lot::Mutex;
use planhub_core::logging::{span_names, targets};
use planhub_core::{ConnectionGuard, ConnectionId, PerfSpan, Property, Signal};
use planhub_style::direction::{derive_classes, DirectionClasses, TextDirection};

use super::language::Language;
use crate::error::Result;
use crate::storage::SharedPreferences;

/// Holds the active interface language and writes every change through to a
/// [`PreferenceStore`](crate::storage::PreferenceStore).
///
/// The direction flag is never stored; [`is_rtl`](Self::is_rtl) derives it
/// from the current language on every call.
pub struct LanguageStore {
    language: Property<Language>,
    /// Serializes switches so memory and storage agree on the last writer.
    switching: Mutex<()>,
    changed: Arc<Signal<Language>>,
    prefs: SharedPreferences,
    key: String,
}

impl LanguageStore {
    /// Initialize from the persisted preference, falling back to
    /// [`Language::DEFAULT`] when it is absent or invalid.
    pub fn init(prefs: SharedPreferences, key: impl Into<String>) -> Self {
        Self::with_default(prefs, key, Language::DEFAULT)
    }

    /// Initialize from the persisted preference with an explicit fallback.
    ///
    /// Initialization never writes to the preference store.
    pub fn with_default(
        prefs: SharedPreferences,
        key: impl Into<String>,
        default: Language,
    ) -> Self {
        let key = key.into();

        let language = match prefs.get(&key) {
            Some(raw) => raw.parse::<Language>().unwrap_or_else(|_| {
                tracing::warn!(
                    target: targets::LOCALE,
                    key = %key,
                    value = %raw,
                    fallback = %default,
                    "ignoring unsupported persisted language"
                );
                default
            }),
            None => default,
        };

        tracing::info!(target: targets::LOCALE, language = %language, "language store initialized");

        Self {
            language: Property::new(language),
            switching: Mutex::new(()),
            changed: Arc::new(Signal::new()),
            prefs,
            key,
        }
    }

    /// The active language.
    pub fn language(&self) -> Language {
        self.language.get()
    }

    /// Whether the active language is written right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.language().is_rtl()
    }

    /// Writing direction of the active language.
    pub fn direction(&self) -> TextDirection {
        self.language().direction()
    }

    /// Class fragments for the active direction, derived fresh on each call.
    pub fn direction_classes(&self) -> DirectionClasses {
        derive_classes(self.is_rtl())
    }

    /// The preference key the language is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Switch language.
    ///
    /// The value is persisted first; if that fails the active language is
    /// left unchanged. Subscribers are notified only when the language
    /// actually changed, but the value is written through on every call.
    /// Concurrent switches are serialized; subscribers run after the switch
    /// lock is released and may switch again.
    pub fn set_language(&self, language: Language) -> Result<()> {
        let _span = PerfSpan::new(span_names::LANGUAGE_SWITCH);

        let previous = {
            let _switching = self.switching.lock();
            self.prefs.set(&self.key, language.code())?;
            self.language.replace(language)
        };

        if let Some(previous) = previous {
            tracing::info!(
                target: targets::LOCALE,
                from = %previous,
                to = %language,
                "language switched"
            );
            self.changed.emit(language);
        }
        Ok(())
    }

    /// Switch language by code.
    ///
    /// Unsupported codes are rejected with
    /// [`LocaleError::UnsupportedLanguage`](crate::LocaleError::UnsupportedLanguage):
    /// nothing changes and nothing is written.
    pub fn set_language_code(&self, code: &str) -> Result<Language> {
        let language = code.parse::<Language>().inspect_err(|_| {
            tracing::warn!(target: targets::LOCALE, code, "rejected unsupported language");
        })?;
        self.set_language(language)?;
        Ok(language)
    }

    /// Signal emitted with the new language after every switch.
    pub fn changed(&self) -> &Arc<Signal<Language>> {
        &self.changed
    }

    /// Call `f` with the new language after every switch.
    pub fn subscribe<F>(&self, f: F) -> ConnectionId
    where
        F: Fn(Language) + Send + Sync + 'static,
    {
        self.changed.connect(move |&language| f(language))
    }

    /// Like [`subscribe`](Self::subscribe), released when the guard drops.
    pub fn subscribe_scoped<F>(&self, f: F) -> ConnectionGuard<Language>
    where
        F: Fn(Language) + Send + Sync + 'static,
    {
        self.changed.connect_scoped(move |&language| f(language))
    }

    /// Remove a subscription made with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }
}

static_assertions::assert_impl_all!(LanguageStore: Send, Sync);
