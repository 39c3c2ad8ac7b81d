//! Render-failure containment.
//!
//! An [`ErrorBoundary`] wraps a renderable subtree. While healthy it passes
//! the subtree's output through unchanged. The first failure, an `Err` or a
//! panic, moves it to the failed state for good: the subtree is dropped and
//! never rendered again, the failure is handed to a [`FailureReporter`], and
//! every subsequent render yields the [`FallbackView`] with its reload
//! control. Only building a new boundary (a full reload) recovers.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use planhub_core::logging::{span_names, targets};
use planhub_core::{PerfSpan, Signal};
use planhub_style::direction::TextDirection;

use crate::locale::Language;

/// Error type a render may return.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Something that renders into `Output` and may fail.
pub trait Render {
    type Output;

    fn render(&mut self) -> Result<Self::Output, RenderError>;
}

impl<F, T> Render for F
where
    F: FnMut() -> Result<T, RenderError>,
{
    type Output = T;

    fn render(&mut self) -> Result<T, RenderError> {
        self()
    }
}

/// How a render failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The render returned an error.
    Error,
    /// The render panicked.
    Panic,
}

/// Details of the failure that tripped a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    /// Name of the boundary that caught the failure.
    pub boundary: String,
    pub origin: FailureOrigin,
    pub message: String,
}

/// Receives failures caught by boundaries.
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &RenderFailure);
}

/// Reports failures as `error` events on the boundary target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &RenderFailure) {
        tracing::error!(
            target: targets::BOUNDARY,
            boundary = %failure.boundary,
            origin = ?failure.origin,
            message = %failure.message,
            "render failure caught by error boundary"
        );
    }
}

/// Observable state of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStatus {
    Healthy,
    Failed,
}

enum BoundaryState<C> {
    Healthy(C),
    Failed(RenderFailure),
}

/// What a boundary rendered.
#[derive(Debug)]
pub enum BoundaryOutput<T> {
    /// The subtree's own output.
    Content(T),
    /// The fallback shown after a failure.
    Fallback(FallbackView),
}

impl<T> BoundaryOutput<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BoundaryOutput::Fallback(_))
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            BoundaryOutput::Content(content) => Some(content),
            BoundaryOutput::Fallback(_) => None,
        }
    }

    pub fn fallback(&self) -> Option<&FallbackView> {
        match self {
            BoundaryOutput::Content(_) => None,
            BoundaryOutput::Fallback(view) => Some(view),
        }
    }
}

/// The fixed view shown by a failed boundary.
#[derive(Clone)]
pub struct FallbackView {
    pub title: &'static str,
    pub message: &'static str,
    pub reload_label: &'static str,
    pub direction: TextDirection,
    reload: Arc<Signal<()>>,
}

impl FallbackView {
    fn new(language: Language, reload: Arc<Signal<()>>) -> Self {
        let (title, message, reload_label) = match language {
            Language::Ar => (
                "حدث خطأ ما",
                "عذراً، حدث خطأ غير متوقع. يرجى إعادة تحميل الصفحة.",
                "إعادة تحميل الصفحة",
            ),
            Language::En => (
                "Something went wrong",
                "Sorry, an unexpected error occurred. Please reload the page.",
                "Reload page",
            ),
        };
        Self {
            title,
            message,
            reload_label,
            direction: language.direction(),
            reload,
        }
    }

    /// Activate the reload control.
    pub fn reload(&self) {
        tracing::info!(target: targets::BOUNDARY, "reload requested from fallback view");
        self.reload.emit(());
    }
}

impl fmt::Debug for FallbackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackView")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("reload_label", &self.reload_label)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Contains render failures of a subtree.
pub struct ErrorBoundary<C> {
    name: String,
    state: BoundaryState<C>,
    language: Language,
    reporter: Arc<dyn FailureReporter>,
    reload_requested: Arc<Signal<()>>,
}

impl<C: Render> ErrorBoundary<C> {
    /// Wrap `child`, reporting failures through [`TracingReporter`].
    pub fn new(name: impl Into<String>, child: C) -> Self {
        Self {
            name: name.into(),
            state: BoundaryState::Healthy(child),
            language: Language::DEFAULT,
            reporter: Arc::new(TracingReporter),
            reload_requested: Arc::new(Signal::new()),
        }
    }

    /// Use a different failure reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Language of the fallback view.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Follow a language switch; affects the fallback view only.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the subtree, or the fallback once failed.
    pub fn render(&mut self) -> BoundaryOutput<C::Output> {
        let _span = PerfSpan::new(span_names::BOUNDARY_RENDER);

        let BoundaryState::Healthy(child) = &mut self.state else {
            return BoundaryOutput::Fallback(self.fallback_view());
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| child.render()));

        let (origin, message) = match outcome {
            Ok(Ok(output)) => return BoundaryOutput::Content(output),
            Ok(Err(err)) => (FailureOrigin::Error, err.to_string()),
            Err(payload) => (FailureOrigin::Panic, panic_message(&*payload)),
        };

        let failure = RenderFailure {
            boundary: self.name.clone(),
            origin,
            message,
        };
        self.reporter.report(&failure);
        // Replacing the state drops the failed subtree.
        self.state = BoundaryState::Failed(failure);

        BoundaryOutput::Fallback(self.fallback_view())
    }

    pub fn status(&self) -> BoundaryStatus {
        match self.state {
            BoundaryState::Healthy(_) => BoundaryStatus::Healthy,
            BoundaryState::Failed(_) => BoundaryStatus::Failed,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status() == BoundaryStatus::Failed
    }

    /// The failure that tripped the boundary.
    pub fn failure(&self) -> Option<&RenderFailure> {
        match &self.state {
            BoundaryState::Healthy(_) => None,
            BoundaryState::Failed(failure) => Some(failure),
        }
    }

    /// Signal emitted when the fallback's reload control is activated.
    ///
    /// The host connects this to a full reload.
    pub fn reload_requested(&self) -> &Arc<Signal<()>> {
        &self.reload_requested
    }

    fn fallback_view(&self) -> FallbackView {
        FallbackView::new(self.language, self.reload_requested.clone())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingReporter {
        failures: Mutex<Vec<RenderFailure>>,
    }

    impl FailureReporter for RecordingReporter {
        fn report(&self, failure: &RenderFailure) {
            self.failures.lock().push(failure.clone());
        }
    }

    #[test]
    fn test_healthy_passes_through() {
        let mut boundary =
            ErrorBoundary::new("app", || -> Result<&str, RenderError> { Ok("page") });
        for _ in 0..3 {
            assert_eq!(boundary.render().content(), Some(&"page"));
        }
        assert_eq!(boundary.status(), BoundaryStatus::Healthy);
        assert!(boundary.failure().is_none());
    }

    #[test]
    fn test_error_trips_boundary_once() {
        let renders = Arc::new(AtomicUsize::new(0));
        let reporter = Arc::new(RecordingReporter::default());

        let renders_clone = renders.clone();
        let mut boundary = ErrorBoundary::new("documents", move || -> Result<(), RenderError> {
            renders_clone.fetch_add(1, Ordering::SeqCst);
            Err("document list failed".into())
        })
        .with_reporter(reporter.clone());

        let first = boundary.render();
        assert!(first.is_fallback());
        assert!(boundary.render().is_fallback());
        assert!(boundary.render().is_fallback());

        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert!(boundary.is_failed());

        let failures = reporter.failures.lock();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].boundary, "documents");
        assert_eq!(failures[0].origin, FailureOrigin::Error);
        assert_eq!(failures[0].message, "document list failed");
    }

    #[test]
    fn test_panic_is_contained() {
        let renders = Arc::new(AtomicUsize::new(0));
        let renders_clone = renders.clone();
        let mut boundary = ErrorBoundary::new("header", move || -> Result<u32, RenderError> {
            if renders_clone.fetch_add(1, Ordering::SeqCst) == 1 {
                panic!("header exploded");
            }
            Ok(1)
        });

        assert_eq!(boundary.render().content(), Some(&1));
        assert!(boundary.render().is_fallback());
        assert!(boundary.render().is_fallback());
        assert_eq!(renders.load(Ordering::SeqCst), 2);

        let failure = boundary.failure().unwrap();
        assert_eq!(failure.origin, FailureOrigin::Panic);
        assert_eq!(failure.message, "header exploded");
    }

    #[test]
    fn test_formatted_panic_message() {
        let mut boundary = ErrorBoundary::new("x", || -> Result<(), RenderError> {
            panic!("bad height {}", 42);
        });
        boundary.render();
        assert_eq!(boundary.failure().unwrap().message, "bad height 42");
    }

    #[test]
    fn test_fallback_offers_reload() {
        let mut boundary =
            ErrorBoundary::new("app", || -> Result<(), RenderError> { Err("boom".into()) });
        let reloads = Arc::new(AtomicUsize::new(0));
        let reloads_clone = reloads.clone();
        boundary.reload_requested().connect(move |_| {
            reloads_clone.fetch_add(1, Ordering::SeqCst);
        });

        let output = boundary.render();
        let view = output.fallback().unwrap();
        assert_eq!(view.reload_label, "إعادة تحميل الصفحة");
        assert_eq!(view.direction, TextDirection::Rtl);

        view.reload();
        assert_eq!(reloads.load(Ordering::SeqCst), 1);
        // Reload is the host's job; the boundary stays failed.
        assert!(boundary.is_failed());
    }

    #[test]
    fn test_fallback_follows_language() {
        let mut boundary =
            ErrorBoundary::new("app", || -> Result<(), RenderError> { Err("boom".into()) })
                .with_language(Language::En);
        assert_eq!(boundary.render().fallback().unwrap().title, "Something went wrong");

        boundary.set_language(Language::Ar);
        assert_eq!(boundary.render().fallback().unwrap().title, "حدث خطأ ما");
    }

    struct Page {
        drops: Arc<AtomicUsize>,
    }

    impl Render for Page {
        type Output = ();

        fn render(&mut self) -> Result<(), RenderError> {
            Err("page failed".into())
        }
    }

    impl Drop for Page {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_failed_subtree_is_dropped() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut boundary = ErrorBoundary::new("page", Page { drops: drops.clone() });
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        boundary.render();
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}
