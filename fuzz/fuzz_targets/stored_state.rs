// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Session storage can hold anything. Reading it back yields a usable state.

#![no_main]

use libfuzzer_sys::fuzz_target;
use postsearch::config::DEFAULT_STORAGE_KEY;
use postsearch::{MemoryStorage, PostSearchState, SearchState, SessionStorage};
use serde_json::Value;
use std::sync::Arc;

fuzz_target!(|raw: String| {
    let storage = Arc::new(MemoryStorage::new());
    if storage.set_item(DEFAULT_STORAGE_KEY, &raw).is_err() {
        return;
    }

    let state = PostSearchState::new(storage);
    let read = state.get_search_state();

    // Either the stored record or the zero state
    let well_formed = serde_json::from_str::<Value>(&raw).ok().filter(|v| {
        v.get("searchTerm").is_some_and(Value::is_string)
            && v.get("activeTag").is_some_and(Value::is_string)
            && v.get("viewAll").is_some_and(Value::is_boolean)
    });
    match well_formed {
        Some(v) => assert_eq!(Some(read.search_term.as_str()), v["searchTerm"].as_str()),
        None => assert_eq!(read, SearchState::default()),
    }

    // A write after garbage round-trips
    state.set_search_state("rust", "wasm", true);
    assert_eq!(state.get_search_state(), SearchState::new("rust", "wasm", true));
});
