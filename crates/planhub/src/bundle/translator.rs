//! Key lookup over cached translation bundles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use planhub_core::logging::targets;

use super::source::{Bundle, BundleSource};
use crate::locale::Language;

type CacheKey = (Language, String);

/// Resolves translation keys against cached bundles.
///
/// Lookup order for `t(language, namespace, key)`:
/// 1. the bundle of `language`
/// 2. the bundle of the fallback language
/// 3. the key itself
///
/// Each `(language, namespace)` pair is loaded at most once; missing or
/// unreadable bundles are remembered as absent and logged once.
pub struct Translator {
    source: Arc<dyn BundleSource>,
    fallback: Language,
    cache: RwLock<HashMap<CacheKey, Option<Arc<Bundle>>>>,
}

impl Translator {
    pub fn new(source: Arc<dyn BundleSource>, fallback: Language) -> Self {
        Self {
            source,
            fallback,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The language consulted when a key is missing.
    pub fn fallback(&self) -> Language {
        self.fallback
    }

    /// Translate `key` in `namespace`.
    pub fn t(&self, language: Language, namespace: &str, key: &str) -> String {
        self.lookup(language, namespace, key)
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate and substitute `{{name}}` placeholders.
    pub fn t_fmt(
        &self,
        language: Language,
        namespace: &str,
        key: &str,
        args: &[(&str, &str)],
    ) -> String {
        let mut text = self.t(language, namespace, key);
        for (name, value) in args {
            text = text
                .replace(&format!("{{{{{name}}}}}"), value)
                .replace(&format!("{{{{ {name} }}}}"), value);
        }
        text
    }

    /// Returns true if `key` resolves in `language` or the fallback.
    pub fn has(&self, language: Language, namespace: &str, key: &str) -> bool {
        self.lookup(language, namespace, key).is_some()
    }

    /// Load bundles ahead of first use.
    pub fn preload(&self, languages: &[Language], namespaces: &[String]) {
        for &language in languages {
            for namespace in namespaces {
                let _ = self.bundle(language, namespace);
            }
        }
    }

    /// Forget every cached bundle so the next lookup reloads from the source.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    fn lookup(&self, language: Language, namespace: &str, key: &str) -> Option<String> {
        let found = self
            .bundle(language, namespace)
            .and_then(|bundle| bundle.get(key).cloned());
        if found.is_some() || language == self.fallback {
            return found;
        }

        tracing::trace!(
            target: targets::BUNDLE,
            language = %language,
            namespace,
            key,
            "key missing, trying fallback language"
        );
        self.bundle(self.fallback, namespace)
            .and_then(|bundle| bundle.get(key).cloned())
    }

    fn bundle(&self, language: Language, namespace: &str) -> Option<Arc<Bundle>> {
        let cache_key = (language, namespace.to_string());
        if let Some(cached) = self.cache.read().get(&cache_key) {
            return cached.clone();
        }

        let loaded = match self.source.load(language, namespace) {
            Ok(Some(bundle)) => {
                tracing::debug!(
                    target: targets::BUNDLE,
                    language = %language,
                    namespace,
                    keys = bundle.len(),
                    "bundle loaded"
                );
                Some(Arc::new(bundle))
            }
            Ok(None) => {
                tracing::warn!(
                    target: targets::BUNDLE,
                    language = %language,
                    namespace,
                    "bundle missing"
                );
                None
            }
            Err(err) => {
                tracing::warn!(
                    target: targets::BUNDLE,
                    language = %language,
                    namespace,
                    error = %err,
                    "bundle failed to load"
                );
                None
            }
        };

        self.cache.write().insert(cache_key, loaded.clone());
        loaded
    }
}
