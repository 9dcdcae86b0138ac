//! Restoring and saving the search state across page loads.

use super::common::{blog_posts, harness_with, PageOptions};
use postsearch::config::DEFAULT_STORAGE_KEY;
use postsearch::{InitPhase, MemoryStorage, SearchEngine, SearchState, SessionStorage, UiEvent};
use std::sync::Arc;

fn storage_with(raw: &str) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();
    storage
}

fn stored(storage: &MemoryStorage) -> SearchState {
    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().expect("state persisted");
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test(start_paused = true)]
async fn restores_term_and_view_without_building() {
    let storage = storage_with(r#"{"searchTerm":"nix","activeTag":"","viewAll":true}"#);
    let h = harness_with(SearchEngine::new(), blog_posts(), storage, PageOptions::default());

    let el = h.ui.elements();
    assert_eq!(el.search_input.value(), "nix");
    assert!(el.clear_button.is_visible());
    assert!(h.ui.is_viewing_all());
    assert_eq!(el.view_label.as_ref().unwrap().text_content(), "Paginate");
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);
    assert_eq!(h.ui.phase(), InitPhase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn restores_the_active_tag() {
    let storage = storage_with(r#"{"searchTerm":"","activeTag":"rust","viewAll":true}"#);
    let h = harness_with(SearchEngine::new(), blog_posts(), storage, PageOptions::default());

    let active: Vec<String> = h
        .ui
        .elements()
        .tag_buttons
        .iter()
        .filter(|b| b.has_class("active"))
        .filter_map(|b| b.attr("data-tag"))
        .collect();
    assert_eq!(active, vec!["rust"]);
    assert_eq!(h.ui.active_tag(), "rust");
    assert_eq!(h.visible_all(), vec!["rust-ownership", "wasm-search"]);
}

#[tokio::test(start_paused = true)]
async fn engine_rerenders_the_paginated_list() {
    let storage = storage_with(r#"{"searchTerm":"","activeTag":"memory","viewAll":false}"#);
    let h = harness_with(SearchEngine::new(), blog_posts(), storage, PageOptions::default());
    // Restored through the substring filter before any build
    assert_eq!(h.visible_paged(), vec!["rust-ownership"]);

    h.ui.dispatch(UiEvent::Focus);
    h.ui.flush().await;
    assert_eq!(h.ui.phase(), InitPhase::Ready);

    h.ui.dispatch(UiEvent::TagSelected(String::new()));
    h.ui.flush().await;
    assert!(!h.ui.is_viewing_all());
    assert_eq!(h.visible_paged(), vec!["rust-ownership", "wasm-search"]);
    assert!(!h.ui.elements().no_results.is_visible());
}

#[tokio::test(start_paused = true)]
async fn corrupt_state_starts_clean() {
    for raw in ["{not json", r#"{"searchTerm":123,"activeTag":"","viewAll":false}"#] {
        let storage = storage_with(raw);
        let h = harness_with(SearchEngine::new(), blog_posts(), storage.clone(), PageOptions::default());

        assert_eq!(h.ui.search_state(), SearchState::default());
        assert_eq!(h.visible_paged(), vec!["rust-ownership", "wasm-search"]);
        // The first search overwrote the bad value
        assert_eq!(stored(&storage), SearchState::default());
    }
}

#[tokio::test(start_paused = true)]
async fn every_search_persists_the_filter() {
    let storage = Arc::new(MemoryStorage::new());
    let h = harness_with(SearchEngine::new(), blog_posts(), storage.clone(), PageOptions::default());

    h.ui.dispatch(UiEvent::Input("wasm".into()));
    h.ui.flush().await;
    assert_eq!(stored(&storage), SearchState::new("wasm", "", false));

    h.ui.dispatch(UiEvent::ToggleView);
    h.ui.flush().await;
    assert_eq!(stored(&storage), SearchState::new("wasm", "", true));
}

#[tokio::test(start_paused = true)]
async fn pagination_saves_the_current_filter() {
    let storage = Arc::new(MemoryStorage::new());
    let h = harness_with(SearchEngine::new(), blog_posts(), storage.clone(), PageOptions::default());

    // Typed but not yet searched
    h.ui.dispatch(UiEvent::Input("ni".into()));
    h.ui.dispatch(UiEvent::Paginate);
    assert_eq!(stored(&storage), SearchState::new("ni", "", false));
    h.ui.cleanup();
}

#[tokio::test(start_paused = true)]
async fn storage_failures_are_invisible() {
    let storage = Arc::new(MemoryStorage::with_quota(8));
    let h = harness_with(SearchEngine::new(), blog_posts(), storage.clone(), PageOptions::default());

    h.ui.dispatch(UiEvent::Input("nix".into()));
    h.ui.flush().await;
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);
    assert!(storage.is_empty());
}
