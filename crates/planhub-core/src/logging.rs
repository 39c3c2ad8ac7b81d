//! Logging facilities for PlanHub.
//!
//! PlanHub uses the `tracing` crate for instrumentation. Library crates never
//! install a subscriber; applications do:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("planhub=debug,planhub_core=info")
//!     .init();
//! ```

/// Span names used throughout PlanHub for tracing.
pub mod span_names {
    /// Runtime bootstrap span.
    pub const BOOTSTRAP: &str = "planhub::bootstrap";
    /// Language switch span.
    pub const LANGUAGE_SWITCH: &str = "planhub::language_switch";
    /// Header height recomputation span.
    pub const HEADER_RECOMPUTE: &str = "planhub::header_recompute";
    /// Error boundary render span.
    pub const BOUNDARY_RENDER: &str = "planhub::boundary_render";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "planhub_core::signal";
    /// Style variables and direction classes.
    pub const STYLE: &str = "planhub_style";
    /// Language store, provider and hooks.
    pub const LOCALE: &str = "planhub::locale";
    /// Preference persistence.
    pub const STORAGE: &str = "planhub::storage";
    /// Resource bundles and translation.
    pub const BUNDLE: &str = "planhub::bundle";
    /// Header height synchronization.
    pub const LAYOUT: &str = "planhub::layout";
    /// Error boundary.
    pub const BOUNDARY: &str = "planhub::boundary";
    /// Runtime bootstrap and configuration.
    pub const RUNTIME: &str = "planhub::runtime";
    /// Performance spans.
    pub const PERF: &str = "planhub::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Useful for tracking the duration of an operation.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "planhub::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
