//! End-to-end tests for the localization runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use planhub::boundary::{BoundaryStatus, ErrorBoundary, RenderError};
use planhub::layout::{
    HeaderElement, HeaderRef, Mutation, ViewportSize, HEADER_HEIGHT_VAR, HEADER_SPACING_VAR,
};
use planhub::locale::{use_direction_classes, use_language, use_rtl, Language};
use planhub::storage::{
    JsonFilePreferences, MemoryPreferences, PreferenceStore, PREFERRED_LANGUAGE_KEY,
};
use planhub::style::direction::TextDirection;
use planhub::{HubConfig, LocalizationRuntime};

fn session_config() -> HubConfig {
    HubConfig {
        persist_preferences: false,
        ..HubConfig::default()
    }
}

fn runtime_with(prefs: Arc<MemoryPreferences>) -> LocalizationRuntime {
    LocalizationRuntime::with_preferences(session_config(), prefs)
        .expect("Failed to bootstrap runtime")
}

struct Header {
    height: Mutex<f32>,
}

impl HeaderElement for Header {
    fn rendered_height(&self) -> f32 {
        *self.height.lock()
    }
}

#[test]
fn test_persisted_english_then_switch_to_arabic() {
    let prefs = Arc::new(MemoryPreferences::with_value(PREFERRED_LANGUAGE_KEY, "en"));
    let runtime = runtime_with(prefs.clone());

    runtime.provider().provide(|| {
        let ctx = use_language().unwrap();
        assert_eq!(ctx.language(), Language::En);
        assert!(!use_rtl().unwrap());
        assert_eq!(use_direction_classes().unwrap().margin_start, "ml-");

        ctx.set_language(Language::Ar).unwrap();

        assert!(use_rtl().unwrap());
        assert_eq!(use_direction_classes().unwrap().margin_start, "mr-");
        assert_eq!(use_direction_classes().unwrap().space_reverse, "space-x-reverse");
    });

    assert_eq!(prefs.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("ar"));
    assert_eq!(prefs.write_count(), 1);
}

#[test]
fn test_no_preference_defaults_to_arabic_without_writing() {
    let prefs = Arc::new(MemoryPreferences::new());
    let runtime = runtime_with(prefs.clone());

    assert_eq!(runtime.language(), Language::Ar);
    assert_eq!(runtime.document_attributes().dir, TextDirection::Rtl);
    assert_eq!(prefs.write_count(), 0);
}

#[test]
fn test_invalid_persisted_value_falls_back() {
    let prefs = Arc::new(MemoryPreferences::with_value(PREFERRED_LANGUAGE_KEY, "klingon"));
    let runtime = runtime_with(prefs.clone());

    assert_eq!(runtime.language(), Language::Ar);
    assert_eq!(prefs.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("klingon"));
}

#[test]
fn test_unsupported_code_is_rejected_without_write() {
    let prefs = Arc::new(MemoryPreferences::with_value(PREFERRED_LANGUAGE_KEY, "en"));
    let runtime = runtime_with(prefs.clone());

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    let _guard = runtime.store().subscribe_scoped(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = runtime.store().set_language_code("fr").unwrap_err();
    assert!(err.is_unsupported_language());
    assert_eq!(runtime.language(), Language::En);
    assert_eq!(prefs.write_count(), 0);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}

#[test]
fn test_choice_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let config = HubConfig {
        preferences_path: Some(path.clone()),
        ..HubConfig::default()
    };

    {
        let runtime = LocalizationRuntime::from_config(config.clone()).unwrap();
        assert_eq!(runtime.language(), Language::Ar);
        runtime.set_language(Language::En).unwrap();
    }

    let on_disk = JsonFilePreferences::open(&path).unwrap();
    assert_eq!(on_disk.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("en"));

    let restarted = LocalizationRuntime::from_config(config).unwrap();
    assert_eq!(restarted.language(), Language::En);
    assert_eq!(restarted.document_attributes().lang, "en");
}

#[test]
fn test_truncated_preferences_file_defaults_to_arabic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, r#"{"preferred-language": "en""#).unwrap();

    let config = HubConfig {
        preferences_path: Some(path.clone()),
        ..HubConfig::default()
    };
    let runtime = LocalizationRuntime::from_config(config).expect("bootstrap with corrupt file");
    assert_eq!(runtime.language(), Language::Ar);

    // The next switch rewrites the file.
    runtime.set_language(Language::En).unwrap();
    let on_disk = JsonFilePreferences::open(&path).unwrap();
    assert_eq!(on_disk.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("en"));
}

#[test]
fn test_header_variables_follow_height() {
    let runtime = runtime_with(Arc::new(MemoryPreferences::new()));
    let element = Arc::new(Header {
        height: Mutex::new(64.0),
    });
    let header = HeaderRef::new();
    header.mount(element.clone());

    let sync = runtime.mount_header(header);
    let vars = runtime.variables();
    assert_eq!(vars.get(HEADER_HEIGHT_VAR).as_deref(), Some("64px"));
    assert_eq!(vars.get(HEADER_SPACING_VAR).as_deref(), Some("96px"));

    *element.height.lock() = 96.0;
    runtime
        .layout_events()
        .notify_resize(ViewportSize::new(390.0, 844.0));
    assert_eq!(vars.get(HEADER_HEIGHT_VAR).as_deref(), Some("96px"));
    assert_eq!(vars.get(HEADER_SPACING_VAR).as_deref(), Some("128px"));

    *element.height.lock() = 112.0;
    runtime
        .layout_events()
        .notify_mutation(Mutation::Attribute("style".into()));
    assert_eq!(vars.get(HEADER_SPACING_VAR).as_deref(), Some("144px"));

    drop(sync);
    assert_eq!(runtime.layout_events().observer_count(), 0);
}

#[test]
fn test_boundary_contains_failures() {
    let runtime = runtime_with(Arc::new(MemoryPreferences::new()));
    let renders = Arc::new(AtomicUsize::new(0));

    let count = renders.clone();
    let render = move || -> Result<&'static str, RenderError> {
        if count.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok("document list")
        } else {
            panic!("document list exploded")
        }
    };
    let mut boundary = runtime.error_boundary("documents", render);

    assert_eq!(boundary.render().content(), Some(&"document list"));
    assert_eq!(boundary.status(), BoundaryStatus::Healthy);

    let output = boundary.render();
    let fallback = output.fallback().expect("fallback after panic");
    assert_eq!(fallback.direction, TextDirection::Rtl);
    assert!(boundary.is_failed());

    // The failed child is never rendered again.
    assert!(boundary.render().is_fallback());
    assert_eq!(renders.load(Ordering::SeqCst), 2);
}

#[test]
fn test_fallback_reload_control() {
    let reloads = Arc::new(AtomicUsize::new(0));
    let mut boundary = ErrorBoundary::new("app", || -> Result<(), RenderError> {
        Err("failed to load".into())
    })
    .with_language(Language::En);

    let counter = reloads.clone();
    boundary.reload_requested().connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let output = boundary.render();
    let fallback = output.fallback().unwrap();
    assert_eq!(fallback.title, "Something went wrong");
    fallback.reload();
    assert_eq!(reloads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_translations_follow_active_language() {
    let dir = tempfile::tempdir().unwrap();
    for (code, title) in [("ar", "مركز المستندات"), ("en", "Document Hub")] {
        let lang_dir = dir.path().join(code);
        std::fs::create_dir_all(&lang_dir).unwrap();
        let bundle = serde_json::json!({ "app": { "title": title } });
        std::fs::write(lang_dir.join("common.json"), bundle.to_string()).unwrap();
    }

    let config = HubConfig {
        persist_preferences: false,
        locales_dir: Some(dir.path().to_path_buf()),
        namespaces: vec!["common".to_string()],
        ..HubConfig::default()
    };
    let runtime = LocalizationRuntime::from_config(config).unwrap();

    assert_eq!(runtime.t("common", "app.title"), "مركز المستندات");
    runtime.set_language(Language::En).unwrap();
    assert_eq!(runtime.t("common", "app.title"), "Document Hub");
    assert_eq!(runtime.t("common", "app.missing"), "app.missing");
}
