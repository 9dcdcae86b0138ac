//! Degraded mode: missing elements and engine load failures.

use super::common::{blog_posts, harness_with, InstrumentedBackend, PageOptions};
use postsearch::{InitPhase, MemoryStorage, SearchEngine, UiEvent};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn missing_required_element_forces_fallback() {
    let h = harness_with(
        SearchEngine::new(),
        blog_posts(),
        Arc::new(MemoryStorage::new()),
        PageOptions {
            without_search_input: true,
            ..PageOptions::default()
        },
    );
    assert!(h.ui.is_fallback());
    assert!(h.ui.elements().search_input.is_detached());

    // The placeholder takes input like the real box
    h.ui.dispatch(UiEvent::Focus);
    h.ui.dispatch(UiEvent::Input("nix".into()));
    h.ui.flush().await;

    assert_eq!(h.ui.phase(), InitPhase::Uninitialized);
    assert!(!h.ui.search().is_initialized());
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);
}

#[tokio::test(start_paused = true)]
async fn load_failure_falls_back_for_good() {
    let backend = InstrumentedBackend::new().failing_load();
    let loads = backend.load_counter();
    let h = harness_with(backend, blog_posts(), Arc::new(MemoryStorage::new()), PageOptions::default());
    assert!(!h.ui.is_fallback());

    h.ui.dispatch(UiEvent::Input("nix".into()));
    h.ui.flush().await;

    assert_eq!(h.ui.phase(), InitPhase::Failed);
    assert!(h.ui.is_fallback());
    assert!(!h.ui.search().is_initialized());
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);

    // No retry
    h.ui.dispatch(UiEvent::Input("rust".into()));
    h.ui.dispatch(UiEvent::Focus);
    h.ui.flush().await;
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    // Substring on title or description: wasm-search mentions Rust in its description
    assert_eq!(h.visible_all(), vec!["rust-ownership", "wasm-search"]);
}

#[tokio::test(start_paused = true)]
async fn fallback_filters_by_exact_tag() {
    let backend = InstrumentedBackend::new().failing_load();
    let h = harness_with(backend, blog_posts(), Arc::new(MemoryStorage::new()), PageOptions::default());

    h.ui.dispatch(UiEvent::TagSelected("rust".into()));
    h.ui.flush().await;
    assert!(h.ui.is_fallback());
    assert_eq!(h.visible_all(), vec!["rust-ownership", "wasm-search"]);

    h.ui.dispatch(UiEvent::TagSelected("rus".into()));
    h.ui.flush().await;
    assert!(h.visible_all().is_empty());
    assert!(h.ui.elements().no_results.is_visible());
}

#[tokio::test(start_paused = true)]
async fn query_failures_do_not_trip_fallback() {
    let backend = InstrumentedBackend::new().failing_queries();
    let h = harness_with(backend, blog_posts(), Arc::new(MemoryStorage::new()), PageOptions::default());

    h.ui.dispatch(UiEvent::Input("nix".into()));
    h.ui.flush().await;
    assert_eq!(h.ui.phase(), InitPhase::Ready);
    assert!(!h.ui.is_fallback());
    // The failed call degrades to an empty result
    assert!(h.visible_all().is_empty());
    assert!(h.ui.elements().no_results.is_visible());
}
