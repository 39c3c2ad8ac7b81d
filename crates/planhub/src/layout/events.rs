//! Layout change notifications supplied by the host.

use std::sync::Arc;

use planhub_core::Signal;

/// Size of the viewport after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A change observed on the header element or its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Direct children were added or removed.
    ChildList,
    /// Something deeper in the subtree changed.
    Subtree,
    /// An attribute of the observed element changed.
    Attribute(String),
}

impl Mutation {
    /// Whether the mutation can change the rendered height.
    ///
    /// Only `class` and `style` attribute changes are considered; structural
    /// changes always are.
    pub fn affects_layout(&self) -> bool {
        match self {
            Mutation::ChildList | Mutation::Subtree => true,
            Mutation::Attribute(name) => matches!(name.as_str(), "class" | "style"),
        }
    }
}

/// The host's "watch for layout-affecting changes" capability.
///
/// A browser host forwards `resize` events and `MutationObserver` records;
/// other hosts emit from their own resize handling, or a poller.
pub struct LayoutEvents {
    viewport_resized: Arc<Signal<ViewportSize>>,
    header_mutated: Arc<Signal<Mutation>>,
}

impl Default for LayoutEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEvents {
    pub fn new() -> Self {
        Self {
            viewport_resized: Arc::new(Signal::new()),
            header_mutated: Arc::new(Signal::new()),
        }
    }

    /// Signal emitted when the viewport is resized.
    pub fn viewport_resized(&self) -> &Arc<Signal<ViewportSize>> {
        &self.viewport_resized
    }

    /// Signal emitted when the header element or its subtree mutates.
    pub fn header_mutated(&self) -> &Arc<Signal<Mutation>> {
        &self.header_mutated
    }

    /// Report a viewport resize.
    pub fn notify_resize(&self, size: ViewportSize) {
        self.viewport_resized.emit(size);
    }

    /// Report a header mutation.
    pub fn notify_mutation(&self, mutation: Mutation) {
        self.header_mutated.emit(mutation);
    }

    /// Number of observers currently attached to either signal.
    pub fn observer_count(&self) -> usize {
        self.viewport_resized.connection_count() + self.header_mutated.connection_count()
    }
}
