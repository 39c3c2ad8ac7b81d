//! Bootstrap of the localization runtime.

use std::sync::Arc;

use planhub_core::logging::{span_names, targets};
use planhub_core::PerfSpan;
use planhub_style::direction::TextDirection;
use planhub_style::variables::{SharedStyleVariables, StyleVariables};

use crate::boundary::{ErrorBoundary, Render};
use crate::bundle::{JsonDirBundles, Translator};
use crate::config::HubConfig;
use crate::error::{ConfigError, Result};
use crate::layout::{HeaderHeightSync, HeaderRef, LayoutEvents};
use crate::locale::{Language, LanguageProvider, LanguageStore};
use crate::storage::{JsonFilePreferences, MemoryPreferences, SharedPreferences};

/// `lang` and `dir` attributes for the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub lang: &'static str,
    pub dir: TextDirection,
}

/// Everything the rendering layer needs, wired from a [`HubConfig`].
pub struct LocalizationRuntime {
    config: HubConfig,
    provider: LanguageProvider,
    variables: SharedStyleVariables,
    layout_events: Arc<LayoutEvents>,
    translator: Option<Translator>,
}

impl LocalizationRuntime {
    /// Bootstrap with the preference store the config asks for.
    ///
    /// Preferences go to a JSON file when persistence is enabled and a path
    /// resolves, otherwise they only live for the session. A malformed file
    /// is treated as empty, so the default language applies.
    pub fn from_config(config: HubConfig) -> std::result::Result<Self, ConfigError> {
        let prefs: SharedPreferences = match config.resolved_preferences_path() {
            Some(path) => Arc::new(JsonFilePreferences::open_or_reset(path)?),
            None => {
                tracing::info!(target: targets::RUNTIME, "preferences are session-only");
                Arc::new(MemoryPreferences::new())
            }
        };
        Self::with_preferences(config, prefs)
    }

    /// Bootstrap with an injected preference store.
    pub fn with_preferences(
        config: HubConfig,
        prefs: SharedPreferences,
    ) -> std::result::Result<Self, ConfigError> {
        let _span = PerfSpan::new(span_names::BOOTSTRAP);

        let default = config.default_language()?;
        let fallback = config.fallback_language()?;
        let store = LanguageStore::with_default(prefs, config.storage_key.clone(), default);

        let translator = config.locales_dir.as_ref().map(|dir| {
            let translator = Translator::new(Arc::new(JsonDirBundles::new(dir)), fallback);
            translator.preload(&Language::ALL, &config.namespaces);
            translator
        });

        tracing::info!(
            target: targets::RUNTIME,
            language = %store.language(),
            translations = translator.is_some(),
            "localization runtime ready"
        );

        Ok(Self {
            config,
            provider: LanguageProvider::new(Arc::new(store)),
            variables: StyleVariables::shared(),
            layout_events: Arc::new(LayoutEvents::new()),
            translator,
        })
    }

    /// Replace the bundle-backed translator.
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<LanguageStore> {
        self.provider.store()
    }

    pub fn provider(&self) -> &LanguageProvider {
        &self.provider
    }

    pub fn variables(&self) -> &SharedStyleVariables {
        &self.variables
    }

    pub fn layout_events(&self) -> &Arc<LayoutEvents> {
        &self.layout_events
    }

    pub fn translator(&self) -> Option<&Translator> {
        self.translator.as_ref()
    }

    pub fn language(&self) -> Language {
        self.store().language()
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.store().set_language(language)
    }

    /// Translate in the active language; without bundles the key is returned.
    pub fn t(&self, namespace: &str, key: &str) -> String {
        match &self.translator {
            Some(translator) => translator.t(self.language(), namespace, key),
            None => key.to_string(),
        }
    }

    /// Root element attributes for the active language.
    pub fn document_attributes(&self) -> DocumentAttributes {
        let language = self.language();
        DocumentAttributes {
            lang: language.code(),
            dir: language.direction(),
        }
    }

    /// Start syncing a header into the runtime's style variables.
    pub fn mount_header(&self, header: HeaderRef) -> HeaderHeightSync {
        HeaderHeightSync::mount_with_offset(
            header,
            &self.layout_events,
            self.variables.clone(),
            self.config.header_spacing_offset,
        )
    }

    /// Wrap a subtree in an error boundary localized to the active language.
    pub fn error_boundary<C: Render>(&self, name: &str, child: C) -> ErrorBoundary<C> {
        ErrorBoundary::new(name, child).with_language(self.language())
    }
}
