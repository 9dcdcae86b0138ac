//! Persisted filter state survives any round trip and any corruption.

use postsearch::config::DEFAULT_STORAGE_KEY;
use postsearch::{MemoryStorage, PostSearchState, SearchState, SessionStorage};
use proptest::prelude::*;
use std::sync::Arc;

fn fresh() -> (Arc<MemoryStorage>, PostSearchState) {
    let storage = Arc::new(MemoryStorage::new());
    let state = PostSearchState::new(storage.clone());
    (storage, state)
}

proptest! {
    #[test]
    fn prop_state_round_trips(term in ".{0,40}", tag in ".{0,20}", view_all in any::<bool>()) {
        let (_, state) = fresh();
        state.set_search_state(&term, &tag, view_all);
        prop_assert_eq!(state.get_search_state(), SearchState::new(term, tag, view_all));
    }

    #[test]
    fn prop_last_write_wins(
        writes in prop::collection::vec((".{0,10}", ".{0,10}", any::<bool>()), 1..6)
    ) {
        let (_, state) = fresh();
        for (term, tag, view_all) in &writes {
            state.set_search_state(term, tag, *view_all);
        }
        let (term, tag, view_all) = writes.last().unwrap().clone();
        prop_assert_eq!(state.get_search_state(), SearchState::new(term, tag, view_all));
    }

    #[test]
    fn prop_garbage_reads_as_default(raw in "[^{]{0,40}") {
        let (storage, state) = fresh();
        storage.set_item(DEFAULT_STORAGE_KEY, &raw).unwrap();
        prop_assert_eq!(state.get_search_state(), SearchState::default());
    }

    #[test]
    fn prop_clear_always_resets(term in ".{0,20}", view_all in any::<bool>()) {
        let (storage, state) = fresh();
        state.set_search_state(&term, "", view_all);
        state.clear_search_state();
        prop_assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
        prop_assert_eq!(state.get_search_state(), SearchState::default());
    }
}
