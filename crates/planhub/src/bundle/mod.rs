//! Translation resource bundles.
//!
//! Bundles follow the `<language>/<namespace>.json` layout used by the web
//! frontend, so the same files serve both.

mod source;
mod translator;

pub use source::{flatten, Bundle, BundleSource, JsonDirBundles, MemoryBundles};
pub use translator::Translator;
