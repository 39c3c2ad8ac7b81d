//! Language provider and consumer hooks.
//!
//! A [`LanguageProvider`] makes a [`LanguageStore`] available to everything
//! that runs inside one of its scopes on the current thread. Consumers reach
//! the store through the hooks ([`use_language`], [`use_rtl`],
//! [`use_direction_classes`]) instead of a global; calling a hook outside
//! every scope fails with [`LocaleError::ContextMissing`].
//!
//! ```
//! use std::sync::Arc;
//! use planhub::locale::{use_language, use_rtl, LanguageProvider, LanguageStore};
//! use planhub::storage::{MemoryPreferences, PREFERRED_LANGUAGE_KEY};
//!
//! let store = LanguageStore::init(Arc::new(MemoryPreferences::new()), PREFERRED_LANGUAGE_KEY);
//! let provider = LanguageProvider::new(Arc::new(store));
//!
//! provider.provide(|| {
//!     assert!(use_rtl().unwrap());
//! });
//! assert!(use_language().is_err());
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use planhub_core::logging::targets;
use planhub_style::direction::{DirectionClasses, TextDirection};

use super::language::Language;
use super::store::LanguageStore;
use crate::error::{LocaleError, Result};

type ProviderStack = Vec<(u64, Arc<LanguageStore>)>;

thread_local! {
    static PROVIDERS: RefCell<ProviderStack> = const { RefCell::new(Vec::new()) };
    static NEXT_SCOPE: Cell<u64> = const { Cell::new(0) };
}

/// Makes a language store available to the hooks.
#[derive(Clone)]
pub struct LanguageProvider {
    store: Arc<LanguageStore>,
}

impl LanguageProvider {
    /// Create a provider for `store`.
    pub fn new(store: Arc<LanguageStore>) -> Self {
        Self { store }
    }

    /// The provided store.
    pub fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }

    /// Enter a provider scope on the current thread.
    ///
    /// Scopes nest; hooks resolve to the innermost live one. Dropping a
    /// scope removes only its own entry, so leaving scopes out of order
    /// never hides a scope that is still alive.
    pub fn enter(&self) -> ProviderScope {
        let token = NEXT_SCOPE.with(|next| {
            let token = next.get();
            next.set(token + 1);
            token
        });
        let depth = PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            providers.push((token, self.store.clone()));
            providers.len()
        });
        tracing::trace!(target: targets::LOCALE, depth, "entered language provider");
        ProviderScope {
            token,
            _not_send: PhantomData,
        }
    }

    /// Run `f` inside a provider scope.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = self.enter();
        f()
    }

    /// A context handle for code that already holds the provider.
    pub fn context(&self) -> LanguageContext {
        LanguageContext {
            store: self.store.clone(),
        }
    }
}

/// Guard for an entered provider scope. Leaves the scope when dropped.
pub struct ProviderScope {
    token: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            let mut providers = providers.borrow_mut();
            let position = providers.iter().rposition(|(token, _)| *token == self.token);
            debug_assert!(position.is_some(), "provider scope left twice");

            if let Some(index) = position {
                if index + 1 != providers.len() {
                    tracing::warn!(
                        target: targets::LOCALE,
                        depth = index + 1,
                        live = providers.len(),
                        "provider scope left out of order"
                    );
                }
                providers.remove(index);
            }
        });
    }
}

/// What the hooks hand to consumers: read access plus the setter.
#[derive(Clone)]
pub struct LanguageContext {
    store: Arc<LanguageStore>,
}

impl std::fmt::Debug for LanguageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageContext").finish_non_exhaustive()
    }
}

impl LanguageContext {
    /// The active language.
    pub fn language(&self) -> Language {
        self.store.language()
    }

    /// Whether the active language is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.store.is_rtl()
    }

    /// Writing direction of the active language.
    pub fn direction(&self) -> TextDirection {
        self.store.direction()
    }

    /// Class fragments for the active direction.
    pub fn direction_classes(&self) -> DirectionClasses {
        self.store.direction_classes()
    }

    /// Switch language.
    pub fn set_language(&self, language: Language) -> Result<()> {
        self.store.set_language(language)
    }

    /// Switch language by code; unsupported codes are rejected.
    pub fn set_language_code(&self, code: &str) -> Result<Language> {
        self.store.set_language_code(code)
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }
}

fn current(hook: &'static str) -> Result<Arc<LanguageStore>> {
    PROVIDERS
        .with(|providers| providers.borrow().last().map(|(_, store)| store.clone()))
        .ok_or_else(|| {
            tracing::error!(
                target: targets::LOCALE,
                hook,
                "hook used outside a language provider"
            );
            LocaleError::ContextMissing { hook }
        })
}

/// The language context of the innermost provider.
pub fn use_language() -> Result<LanguageContext> {
    current("use_language").map(|store| LanguageContext { store })
}

/// Whether the innermost provider's language is right-to-left.
pub fn use_rtl() -> Result<bool> {
    current("use_rtl").map(|store| store.is_rtl())
}

/// Class fragments for the innermost provider's direction.
pub fn use_direction_classes() -> Result<DirectionClasses> {
    current("use_direction_classes").map(|store| store.direction_classes())
}
