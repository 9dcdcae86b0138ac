//! Free-text ranking: field weights, tie order, limits.

use super::common::{engine_with, ids, scenario_posts};
use postsearch::ui::fallback::matches_post;
use postsearch::PostRecord;

// ============================================================================
// SCENARIO
// ============================================================================

#[test]
fn scenario_javascript_hits_p1_in_every_field() {
    let engine = engine_with(&scenario_posts());
    let results = engine.search("javascript", 10);

    assert_eq!(ids(&results), vec!["p1"]);
    let hit = &results[0];
    // title 3 + description 1 + keyword 2
    assert_eq!(hit.score, 6.0);
    assert!(hit.title_match);
    assert!(hit.description_match);
    assert_eq!(hit.keyword_matches, vec!["javascript"]);
}

#[test]
fn term_inside_a_word_scores_every_field() {
    let engine = engine_with(&scenario_posts());
    let results = engine.search("script", 10);

    // "script" sits inside javascript / typescript in all three fields
    assert_eq!(ids(&results), vec!["p1", "p2"]);
    for hit in &results {
        assert_eq!(hit.score, 6.0);
        assert!(hit.title_match);
        assert!(hit.description_match);
    }
    assert_eq!(results[0].keyword_matches, vec!["javascript"]);
    assert_eq!(results[1].keyword_matches, vec!["typescript"]);
}

#[test]
fn keyword_substring_counts_once_per_keyword() {
    let engine = engine_with(&[
        PostRecord::new("p", "Weekly Notes").with_keywords(["rustlang", "rust-wasm", "rustlang"]),
    ]);
    let results = engine.search("rust", 10);

    // Two distinct keywords; the title never mentions the term
    assert_eq!(results[0].score, 4.0);
    assert!(!results[0].title_match);
    assert_eq!(results[0].keyword_matches, vec!["rustlang", "rust-wasm"]);
}

#[test]
fn mid_word_title_hit_agrees_with_the_basic_filter() {
    let post = PostRecord::new("p1", "JavaScript Testing");
    let engine = engine_with(&[post.clone()]);

    let results = engine.search("script", 10);
    assert_eq!(ids(&results), vec!["p1"]);
    assert_eq!(results[0].score, 3.0);
    assert!(results[0].title_match);
    assert!(matches_post(&post, "script", ""));
}

#[test]
fn terms_accumulate_across_the_query() {
    let engine = engine_with(&scenario_posts());
    let results = engine.search("typescript guide", 10);

    assert_eq!(ids(&results), vec!["p2"]);
    // typescript: 3 + 1 + 2, guide: 3 + 1
    assert_eq!(results[0].score, 10.0);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn title_outranks_description() {
    let engine = engine_with(&[
        PostRecord::new("desc", "Weekly Notes").with_description("a little rust on the side"),
        PostRecord::new("title", "Rust Tips"),
    ]);
    let results = engine.search("rust", 10);
    assert_eq!(ids(&results), vec!["title", "desc"]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn ties_keep_insertion_order() {
    let posts: Vec<PostRecord> = ["c", "a", "b"]
        .iter()
        .map(|id| PostRecord::new(*id, "Rust Notes"))
        .collect();
    let engine = engine_with(&posts);
    assert_eq!(ids(&engine.search("rust", 10)), vec!["c", "a", "b"]);
}

#[test]
fn higher_scores_come_first_regardless_of_insertion() {
    let engine = engine_with(&[
        PostRecord::new("weak", "Something").with_keywords(["rustacean"]),
        PostRecord::new("strong", "Rust and more Rust"),
    ]);
    let results = engine.search("rust", 10);
    assert_eq!(ids(&results), vec!["strong", "weak"]);
    assert_eq!(results[0].score, 6.0);
    assert_eq!(results[1].score, 2.0);
}

// ============================================================================
// LIMITS AND DUPLICATES
// ============================================================================

#[test]
fn max_results_truncates_after_ranking() {
    let posts: Vec<PostRecord> = (0..10)
        .map(|i| PostRecord::new(format!("p{}", i), "Rust"))
        .chain(std::iter::once(PostRecord::new("best", "Rust Rust Rust")))
        .collect();
    let engine = engine_with(&posts);

    let results = engine.search("rust", 3);
    assert_eq!(ids(&results), vec!["best", "p0", "p1"]);
    assert!(engine.search("rust", 0).is_empty());
}

#[test]
fn duplicate_adds_accumulate_into_one_result() {
    let post = PostRecord::new("p1", "Rust Ownership").with_keywords(["rust"]);
    let engine = engine_with(&[post.clone(), PostRecord::new("p2", "Rust"), post]);

    let results = engine.search("rust", 10);
    assert_eq!(ids(&results), vec!["p1", "p2"]);
    // (3 + 2) twice
    assert_eq!(results[0].score, 10.0);
    assert_eq!(results[0].keyword_matches, vec!["rust"]);
    assert_eq!(engine.stats().total_posts, 3);
}

// ============================================================================
// SNIPPETS
// ============================================================================

#[test]
fn results_carry_a_snippet_from_the_description() {
    let engine = engine_with(&scenario_posts());
    let results = engine.search("javascript", 10);
    assert_eq!(
        results[0].snippet.as_deref(),
        Some("learn about testing in javascript")
    );
}

#[test]
fn snippet_falls_back_to_title() {
    let engine = engine_with(&[PostRecord::new("p", "Rust Without Description")]);
    let results = engine.search("rust", 10);
    assert_eq!(results[0].snippet.as_deref(), Some("rust without description"));
}
