//! Mirrors the rendered header height into global style variables.
//!
//! Content below a fixed header is offset with
//! `padding-top: var(--header-spacing)`. [`HeaderHeightSync`] keeps
//! `--header-height` and `--header-spacing` equal to the live height of the
//! header, recomputing on mount, on every viewport resize and on every
//! layout-affecting mutation of the header.

use std::sync::Arc;

use parking_lot::RwLock;
use planhub_core::logging::{span_names, targets};
use planhub_core::{ConnectionGuard, PerfSpan, Property};
use planhub_style::variables::{format_px, SharedStyleVariables};

use super::events::{LayoutEvents, Mutation, ViewportSize};

/// Variable holding the measured header height.
pub const HEADER_HEIGHT_VAR: &str = "--header-height";
/// Variable holding the header height plus the spacing offset.
pub const HEADER_SPACING_VAR: &str = "--header-spacing";
/// Default gap, in pixels, between the header and the content below it.
pub const DEFAULT_SPACING_OFFSET: f32 = 32.0;

/// A rendered element whose height can be measured.
pub trait HeaderElement: Send + Sync {
    /// Current rendered height in pixels.
    fn rendered_height(&self) -> f32;
}

/// A slot that holds the header element while it is mounted.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct HeaderRef {
    element: Arc<RwLock<Option<Arc<dyn HeaderElement>>>>,
}

impl HeaderRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the rendered element.
    pub fn mount(&self, element: Arc<dyn HeaderElement>) {
        *self.element.write() = Some(element);
    }

    /// Detach the element, returning it.
    pub fn unmount(&self) -> Option<Arc<dyn HeaderElement>> {
        self.element.write().take()
    }

    pub fn is_mounted(&self) -> bool {
        self.element.read().is_some()
    }

    /// Height of the mounted element, if any.
    pub fn height(&self) -> Option<f32> {
        self.element.read().as_ref().map(|el| el.rendered_height())
    }
}

/// A header measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderMetrics {
    pub height: f32,
}

impl HeaderMetrics {
    /// Height plus `offset`.
    pub fn spacing(&self, offset: f32) -> f32 {
        self.height + offset
    }
}

struct Recomputer {
    header: HeaderRef,
    variables: SharedStyleVariables,
    offset: f32,
    metrics: Property<Option<HeaderMetrics>>,
}

impl Recomputer {
    fn recompute(&self, reason: &'static str) -> Option<HeaderMetrics> {
        let _span = PerfSpan::new(span_names::HEADER_RECOMPUTE);

        let Some(height) = self.header.height() else {
            tracing::debug!(
                target: targets::LAYOUT,
                reason,
                "header not mounted, skipping recompute"
            );
            return None;
        };

        if !height.is_finite() {
            tracing::warn!(
                target: targets::LAYOUT,
                reason,
                height,
                "header height is not finite, skipping publish"
            );
            return None;
        }

        let metrics = HeaderMetrics { height };
        for (name, value) in [
            (HEADER_HEIGHT_VAR, metrics.height),
            (HEADER_SPACING_VAR, metrics.spacing(self.offset)),
        ] {
            if let Err(err) = self.variables.set(name, format_px(value)) {
                tracing::warn!(
                    target: targets::LAYOUT,
                    error = %err,
                    "failed to publish header variable"
                );
            }
        }

        if self.metrics.set(Some(metrics)) {
            tracing::debug!(
                target: targets::LAYOUT,
                reason,
                height,
                spacing = metrics.spacing(self.offset),
                "header height changed"
            );
        }
        Some(metrics)
    }
}

/// Keeps the header variables in sync while it is alive.
///
/// Dropping it releases every observer it registered.
pub struct HeaderHeightSync {
    recomputer: Arc<Recomputer>,
    _resize: ConnectionGuard<ViewportSize>,
    _mutation: ConnectionGuard<Mutation>,
}

impl HeaderHeightSync {
    /// Start syncing with the default spacing offset.
    pub fn mount(
        header: HeaderRef,
        events: &LayoutEvents,
        variables: SharedStyleVariables,
    ) -> Self {
        Self::mount_with_offset(header, events, variables, DEFAULT_SPACING_OFFSET)
    }

    /// Start syncing with a custom spacing offset.
    ///
    /// Recomputes once immediately; an unmounted header is not an error and
    /// is picked up by the next resize or mutation after it mounts.
    pub fn mount_with_offset(
        header: HeaderRef,
        events: &LayoutEvents,
        variables: SharedStyleVariables,
        offset: f32,
    ) -> Self {
        let recomputer = Arc::new(Recomputer {
            header,
            variables,
            offset,
            metrics: Property::new(None),
        });

        let on_resize = recomputer.clone();
        let resize = events.viewport_resized().connect_scoped(move |_| {
            on_resize.recompute("resize");
        });

        let on_mutation = recomputer.clone();
        let mutation = events.header_mutated().connect_scoped(move |m| {
            if m.affects_layout() {
                on_mutation.recompute("mutation");
            }
        });

        recomputer.recompute("mount");
        tracing::debug!(target: targets::LAYOUT, offset, "header height sync mounted");

        Self {
            recomputer,
            _resize: resize,
            _mutation: mutation,
        }
    }

    /// Measure now and publish, e.g. from a poller.
    pub fn recompute(&self) -> Option<HeaderMetrics> {
        self.recomputer.recompute("manual")
    }

    /// Last published measurement.
    pub fn metrics(&self) -> Option<HeaderMetrics> {
        self.recomputer.metrics.get()
    }

    pub fn spacing_offset(&self) -> f32 {
        self.recomputer.offset
    }

    /// Stop syncing. Equivalent to dropping.
    pub fn unmount(self) {
        tracing::debug!(target: targets::LAYOUT, "header height sync unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use planhub_style::variables::StyleVariables;

    struct FakeHeader {
        height: Mutex<f32>,
    }

    impl FakeHeader {
        fn new(height: f32) -> Arc<Self> {
            Arc::new(Self {
                height: Mutex::new(height),
            })
        }

        fn resize(&self, height: f32) {
            *self.height.lock() = height;
        }
    }

    impl HeaderElement for FakeHeader {
        fn rendered_height(&self) -> f32 {
            *self.height.lock()
        }
    }

    fn var(vars: &SharedStyleVariables, name: &str) -> Option<String> {
        vars.get(name)
    }

    #[test]
    fn test_publishes_on_mount() {
        let header = HeaderRef::new();
        header.mount(FakeHeader::new(64.0));
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();

        let sync = HeaderHeightSync::mount(header, &events, vars.clone());

        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("64px"));
        assert_eq!(var(&vars, HEADER_SPACING_VAR).as_deref(), Some("96px"));
        assert_eq!(sync.metrics(), Some(HeaderMetrics { height: 64.0 }));
    }

    #[test]
    fn test_resize_recomputes() {
        let el = FakeHeader::new(64.0);
        let header = HeaderRef::new();
        header.mount(el.clone());
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();
        let _sync = HeaderHeightSync::mount(header, &events, vars.clone());

        el.resize(96.0);
        events.notify_resize(ViewportSize::new(600.0, 800.0));

        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("96px"));
        assert_eq!(var(&vars, HEADER_SPACING_VAR).as_deref(), Some("128px"));
    }

    #[test]
    fn test_only_layout_mutations_recompute() {
        let el = FakeHeader::new(64.0);
        let header = HeaderRef::new();
        header.mount(el.clone());
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();
        let _sync = HeaderHeightSync::mount(header, &events, vars.clone());

        el.resize(80.0);
        events.notify_mutation(Mutation::Attribute("data-open".into()));
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("64px"));

        events.notify_mutation(Mutation::Attribute("class".into()));
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("80px"));

        el.resize(120.0);
        events.notify_mutation(Mutation::Subtree);
        assert_eq!(var(&vars, HEADER_SPACING_VAR).as_deref(), Some("152px"));
    }

    #[test]
    fn test_unmounted_header_is_a_noop() {
        let header = HeaderRef::new();
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();
        let sync = HeaderHeightSync::mount(header.clone(), &events, vars.clone());

        events.notify_resize(ViewportSize::new(1024.0, 768.0));
        assert!(sync.recompute().is_none());
        assert!(vars.is_empty());

        header.mount(FakeHeader::new(72.0));
        events.notify_mutation(Mutation::ChildList);
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("72px"));

        header.unmount();
        assert!(sync.recompute().is_none());
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("72px"));
    }

    #[test]
    fn test_drop_releases_observers() {
        let el = FakeHeader::new(64.0);
        let header = HeaderRef::new();
        header.mount(el.clone());
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();

        let sync = HeaderHeightSync::mount(header.clone(), &events, vars.clone());
        assert_eq!(events.observer_count(), 2);
        sync.unmount();
        assert_eq!(events.observer_count(), 0);

        el.resize(200.0);
        events.notify_resize(ViewportSize::new(1.0, 1.0));
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("64px"));

        // Remounting registers a fresh pair.
        let _again = HeaderHeightSync::mount(header, &events, vars.clone());
        assert_eq!(events.observer_count(), 2);
        assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("200px"));
    }

    #[test]
    fn test_non_finite_height_is_not_published() {
        let el = FakeHeader::new(64.0);
        let header = HeaderRef::new();
        header.mount(el.clone());
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();
        let sync = HeaderHeightSync::mount(header, &events, vars.clone());

        for height in [f32::NAN, f32::INFINITY] {
            el.resize(height);
            events.notify_resize(ViewportSize::new(800.0, 600.0));
            assert!(sync.recompute().is_none());
            assert_eq!(var(&vars, HEADER_HEIGHT_VAR).as_deref(), Some("64px"));
            assert_eq!(var(&vars, HEADER_SPACING_VAR).as_deref(), Some("96px"));
        }
        assert_eq!(sync.metrics(), Some(HeaderMetrics { height: 64.0 }));
    }

    #[test]
    fn test_custom_offset() {
        let header = HeaderRef::new();
        header.mount(FakeHeader::new(50.0));
        let events = LayoutEvents::new();
        let vars = StyleVariables::shared();
        let sync = HeaderHeightSync::mount_with_offset(header, &events, vars.clone(), 16.0);

        assert_eq!(sync.spacing_offset(), 16.0);
        assert_eq!(var(&vars, HEADER_SPACING_VAR).as_deref(), Some("66px"));
    }
}
