// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary queries and tags against a small blog.
//!
//! Free-text and tag search are total: any string in, a ranked list out.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use postsearch::search::snippet::SNIPPET_MAX_BYTES;
use postsearch::testing::blog_posts;
use postsearch::SearchEngine;
use std::collections::HashSet;

#[derive(Arbitrary, Debug)]
struct Input {
    query: String,
    tag: String,
    limit: u8,
}

fuzz_target!(|input: Input| {
    static ENGINE: std::sync::OnceLock<SearchEngine> = std::sync::OnceLock::new();
    let engine = ENGINE.get_or_init(|| {
        let mut engine = SearchEngine::new();
        for post in blog_posts() {
            engine.add_post(&post);
        }
        engine
    });

    // Cap query length to avoid timeout
    let query: String = input.query.chars().take(200).collect();
    let limit = usize::from(input.limit);

    let results = engine.search(&query, limit);
    assert!(results.len() <= limit);
    if query.trim().is_empty() {
        assert!(results.is_empty());
    }

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "results out of order");
    }
    let mut seen = HashSet::new();
    for r in &results {
        assert!(r.score.is_finite() && r.score > 0.0);
        assert!(seen.insert(r.id.clone()), "duplicate id {}", r.id);
        if let Some(snippet) = &r.snippet {
            assert!(snippet.len() <= SNIPPET_MAX_BYTES + "...".len());
        }
    }

    // Same query, same answer
    assert_eq!(results, engine.search(&query, limit));

    for r in engine.search_by_tag(&input.tag) {
        assert_eq!(r.score, 1.0);
        assert_eq!(r.keyword_matches.len(), 1);
    }
});
