//! Style surface for PlanHub.
//!
//! This crate holds everything the localization runtime publishes to the
//! styling layer:
//!
//! - **Text direction**: RTL/LTR classification of languages and text
//! - **Direction classes**: the logical-role to class-fragment table used to
//!   mirror layouts for right-to-left languages
//! - **Style variables**: the global CSS custom properties (such as
//!   `--header-height`) consumed by stylesheets
//!
//! # Example
//!
//! ```
//! use planhub_style::prelude::*;
//!
//! let classes = derive_classes(TextDirection::for_language("ar").is_rtl());
//! assert_eq!(classes.text_align, "text-right");
//! assert_eq!(classes.compose(LayoutRole::MarginStart, "4"), "mr-4");
//!
//! let vars = StyleVariables::new();
//! vars.set("--header-height", format_px(64.0)).unwrap();
//! assert_eq!(vars.get("header-height").as_deref(), Some("64px"));
//! ```

pub mod direction;
pub mod variables;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::direction::{derive_classes, DirectionClasses, LayoutRole, TextDirection};
    pub use crate::variables::{format_px, SharedStyleVariables, StyleVariables};
}
