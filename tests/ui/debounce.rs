//! Keystrokes collapse into one search per quiet window.

use super::common::harness;
use postsearch::config::DEFAULT_STORAGE_KEY;
use postsearch::{InitPhase, SearchState, SessionStorage, UiEvent};
use std::time::Duration;

fn stored_term(h: &super::common::Harness) -> String {
    let raw = h.storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    serde_json::from_str::<SearchState>(&raw).unwrap().search_term
}

#[tokio::test(start_paused = true)]
async fn nothing_fires_inside_the_window() {
    let h = harness();
    h.ui.dispatch(UiEvent::Input("rust".into()));

    tokio::time::sleep(Duration::from_millis(299)).await;
    assert_eq!(stored_term(&h), "");
    assert_eq!(h.ui.phase(), InitPhase::Uninitialized);
    assert!(h.ui.elements().post_list.is_visible());

    h.ui.flush().await;
    assert_eq!(stored_term(&h), "rust");
    assert_eq!(h.visible_all(), vec!["rust-ownership", "wasm-search"]);
}

#[tokio::test(start_paused = true)]
async fn each_keystroke_restarts_the_window() {
    let h = harness();
    for (i, prefix) in ["n", "ni", "nix"].iter().enumerate() {
        h.ui.dispatch(UiEvent::Input(prefix.to_string()));
        if i < 2 {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    }

    // 250 ms after the last keystroke
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(stored_term(&h), "");

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(stored_term(&h), "nix");
    h.ui.flush().await;
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);
}

#[tokio::test(start_paused = true)]
async fn submit_skips_the_wait() {
    let h = harness();
    h.ui.dispatch(UiEvent::Input("nix".into()));
    h.ui.dispatch(UiEvent::Submit);
    h.ui.flush().await;

    assert_eq!(stored_term(&h), "nix");
    assert_eq!(h.visible_all(), vec!["nix-flakes"]);
}
