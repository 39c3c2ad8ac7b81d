//! Language switching walkthrough.
//!
//! Bootstraps the runtime with session-only preferences, mounts a header,
//! switches language and trips an error boundary, logging every step.
//!
//! Run with: RUST_LOG=planhub=debug cargo run -p planhub --example language_switch

use std::sync::Arc;

use parking_lot::Mutex;
use planhub::boundary::RenderError;
use planhub::layout::{HeaderElement, HeaderRef, ViewportSize};
use planhub::locale::{use_direction_classes, use_language, Language};
use planhub::{HubConfig, LocalizationRuntime};
use tracing_subscriber::EnvFilter;

struct StaticHeader {
    height: Mutex<f32>,
}

impl HeaderElement for StaticHeader {
    fn rendered_height(&self) -> f32 {
        *self.height.lock()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = HubConfig {
        persist_preferences: false,
        ..HubConfig::default()
    };
    let runtime = LocalizationRuntime::from_config(config)?;

    let element = Arc::new(StaticHeader {
        height: Mutex::new(64.0),
    });
    let header = HeaderRef::new();
    header.mount(element.clone());
    let _sync = runtime.mount_header(header);

    let _on_switch = runtime.store().subscribe_scoped(|language| {
        println!("switched to {} ({})", language.native_name(), language.direction());
    });

    runtime.provider().provide(|| -> planhub::Result<()> {
        let ctx = use_language()?;
        let classes = use_direction_classes()?;
        println!("{} uses {}4 for leading margin", ctx.language(), classes.margin_start);

        ctx.set_language(Language::En)?;
        let classes = use_direction_classes()?;
        println!("{} uses {}4 for leading margin", ctx.language(), classes.margin_start);
        Ok(())
    })?;

    *element.height.lock() = 96.0;
    runtime
        .layout_events()
        .notify_resize(ViewportSize::new(390.0, 844.0));
    println!("{}", runtime.variables().to_root_block());

    let mut boundary = runtime.error_boundary("dashboard", || -> Result<(), RenderError> {
        Err("dashboard data unavailable".into())
    });
    if let Some(fallback) = boundary.render().fallback() {
        println!("{}: {} [{}]", fallback.title, fallback.message, fallback.reload_label);
    }

    let attrs = runtime.document_attributes();
    println!("<html lang=\"{}\" dir=\"{}\">", attrs.lang, attrs.dir.as_attr());
    Ok(())
}
