// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Post JSON from the page is untrusted. Bad input is an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use postsearch::SearchEngine;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let mut engine = SearchEngine::new();
    match engine.add_post_json(json) {
        Ok(()) => assert_eq!(engine.stats().total_posts, 1),
        Err(_) => assert_eq!(engine.stats().total_posts, 0),
    }

    // Whatever got indexed must be searchable
    let _ = engine.search(json, 10);
});
