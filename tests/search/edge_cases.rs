//! Inputs at the edges: blank, punctuation, unicode, malformed JSON.

use super::common::{engine_with, ids, scenario_posts};
use postsearch::{PostRecord, SearchEngine, SearchError};

#[test]
fn blank_queries_return_nothing_and_leave_stats_alone() {
    let engine = engine_with(&scenario_posts());
    let before = engine.stats();
    for query in ["", "   ", "\t\n"] {
        assert!(engine.search(query, 10).is_empty(), "query {:?}", query);
    }
    assert!(engine.search_by_tag("").is_empty());
    assert_eq!(engine.stats(), before);
}

#[test]
fn punctuation_only_query_is_empty() {
    let engine = engine_with(&scenario_posts());
    assert!(engine.search("!!! ???", 10).is_empty());
}

#[test]
fn punctuation_in_query_is_ignored() {
    let engine = engine_with(&scenario_posts());
    assert_eq!(ids(&engine.search("JavaScript!", 10)), vec!["p1"]);
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn diacritics_fold() {
    let engine = engine_with(&[PostRecord::new("cafe", "Café Culture").with_keywords(["Résumé"])]);
    assert_eq!(ids(&engine.search("cafe", 10)), vec!["cafe"]);
    assert_eq!(ids(&engine.search("CAFÉ", 10)), vec!["cafe"]);
    assert_eq!(ids(&engine.search_by_tag("resume")), vec!["cafe"]);
}

#[test]
fn empty_title_indexes_without_tokens() {
    let engine = engine_with(&[PostRecord::new("blank", "")]);
    let stats = engine.stats();
    assert_eq!(stats.total_posts, 1);
    assert_eq!(stats.indexed_words, 0);
    assert!(engine.search("anything", 10).is_empty());
}

#[test]
fn single_letter_terms_match_inside_longer_words() {
    let engine = engine_with(&[
        PostRecord::new("a", "A Post").with_keywords(["xyz"]),
        PostRecord::new("b", "Other").with_keywords(["sql"]),
        PostRecord::new("c", "Data Notes"),
    ]);
    // A lone "a" is below the token length floor; "data" still carries one
    assert_eq!(ids(&engine.search("a", 10)), vec!["c"]);
    assert_eq!(ids(&engine.search("q", 10)), vec!["b"]);
}

#[test]
fn clear_empties_but_keeps_the_engine_usable() {
    let mut engine = engine_with(&scenario_posts());
    engine.clear();
    let stats = engine.stats();
    assert_eq!((stats.total_posts, stats.indexed_words, stats.indexed_keywords), (0, 0, 0));
    assert!(engine.search("javascript", 10).is_empty());

    engine.add_post(&PostRecord::new("p3", "JavaScript Again"));
    assert_eq!(ids(&engine.search("javascript", 10)), vec!["p3"]);
}

#[test]
fn json_posts_are_validated() {
    let mut engine = SearchEngine::new();
    engine
        .add_post_json(r#"{"id":"p1","title":"Rust","keywords":["rust"]}"#)
        .unwrap();
    assert!(matches!(
        engine.add_post_json(r#"{"title":"no id"}"#),
        Err(SearchError::InvalidPost(_))
    ));
    assert!(matches!(engine.add_post_json("not json"), Err(SearchError::InvalidPost(_))));
    assert_eq!(engine.stats().total_posts, 1);
}

#[test]
fn vocabulary_counts_unique_tokens_across_fields() {
    let engine = engine_with(&scenario_posts());
    // javascript testing learn about in typescript guide development
    assert_eq!(engine.stats().indexed_words, 8);
}
