//! Runtime language selection.
//!
//! - [`Language`]: the closed set of interface languages
//! - [`LanguageStore`]: the active language, persisted on every switch
//! - [`LanguageProvider`] and the `use_*` hooks: scoped access for consumers

mod context;
mod language;
mod store;

pub use context::{
    use_direction_classes, use_language, use_rtl, LanguageContext, LanguageProvider, ProviderScope,
};
pub use language::Language;
pub use store::LanguageStore;
