//! Properties of the engine and the façade over random post sets.

use super::common::engine_with;
use postsearch::ui::fallback::matches_post;
use postsearch::{PostRecord, PostSearch};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..6).prop_map(|words| words.join(" "))
}

fn posts_strategy() -> impl Strategy<Value = Vec<PostRecord>> {
    prop::collection::vec(
        (
            text_strategy(),
            prop::option::of(text_strategy()),
            prop::collection::vec(word_strategy(), 0..4),
        ),
        1..8,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (title, description, keywords))| PostRecord {
                id: format!("p{}", i),
                title,
                description,
                keywords,
            })
            .collect()
    })
}

fn facade(posts: Vec<PostRecord>) -> PostSearch {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let search = PostSearch::default();
    runtime.block_on(search.init(posts)).unwrap();
    search
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_blank_queries_are_empty(posts in posts_strategy(), blank in "[ \t\n]{0,5}") {
        let engine = engine_with(&posts);
        let before = engine.stats();
        prop_assert!(engine.search(&blank, 100).is_empty());
        prop_assert!(engine.search_by_tag(&blank).is_empty());
        prop_assert_eq!(engine.stats(), before);
    }

    #[test]
    fn prop_results_are_sorted_and_non_negative(posts in posts_strategy(), query in text_strategy()) {
        let engine = engine_with(&posts);
        let results = engine.search(&query, 100);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for r in &results {
            prop_assert!(r.score > 0.0 && r.score.is_finite());
            let unique: HashSet<&String> = r.keyword_matches.iter().collect();
            prop_assert_eq!(unique.len(), r.keyword_matches.len());
        }
        let ids: HashSet<&str> = results.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), results.len());
    }

    #[test]
    fn prop_equal_scores_keep_insertion_order(posts in posts_strategy(), query in text_strategy()) {
        let engine = engine_with(&posts);
        let results = engine.search(&query, 100);
        let position = |id: &str| posts.iter().position(|p| p.id == id).unwrap();
        for pair in results.windows(2) {
            if pair[0].score == pair[1].score {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }

    #[test]
    fn prop_title_word_is_always_found(posts in posts_strategy(), pick in any::<prop::sample::Index>()) {
        let post = &posts[pick.index(posts.len())];
        let word = post.title.split_whitespace().next().unwrap().to_string();
        let engine = engine_with(&posts);

        let results = engine.search(&word, posts.len());
        let hit = results.iter().find(|r| r.id == post.id);
        prop_assert!(hit.is_some());
        prop_assert!(hit.unwrap().title_match);
        // The substring fallback agrees
        prop_assert!(matches_post(post, &word, ""));
    }

    #[test]
    fn prop_title_substring_is_found_by_both_paths(
        posts in posts_strategy(),
        pick in any::<prop::sample::Index>(),
        start in any::<prop::sample::Index>(),
        len in any::<prop::sample::Index>(),
    ) {
        let post = &posts[pick.index(posts.len())];
        // Titles are ASCII, so byte offsets are char boundaries
        let from = start.index(post.title.len());
        let to = from + 1 + len.index(post.title.len() - from);
        let query = post.title[from..to].trim().to_string();
        prop_assume!(!query.is_empty());

        let engine = engine_with(&posts);
        let results = engine.search(&query, posts.len());
        let hit = results.iter().find(|r| r.id == post.id);
        prop_assert!(hit.is_some(), "{:?} not found in {:?}", query, post.title);
        prop_assert!(hit.unwrap().title_match);
        prop_assert!(matches_post(post, &query, ""));
    }

    #[test]
    fn prop_title_beats_description(word in word_strategy(), filler in word_strategy()) {
        prop_assume!(word != filler && !filler.contains(&word));
        let engine = engine_with(&[
            PostRecord::new("b", filler.clone()).with_description(word.clone()),
            PostRecord::new("a", word.clone()),
        ]);
        let results = engine.search(&word, 10);
        prop_assert_eq!(results[0].id.as_str(), "a");
        prop_assert!(results[0].score > results[1].score);
    }

    #[test]
    fn prop_combined_with_nothing_returns_everything(posts in posts_strategy()) {
        let search = facade(posts.clone());
        prop_assert_eq!(search.combined_search("", "", 1), posts);
    }

    #[test]
    fn prop_tag_only_narrows(posts in posts_strategy(), term in text_strategy(), tag in word_strategy()) {
        let search = facade(posts);
        let ranked: Vec<String> = search.search(&term, 100).into_iter().map(|r| r.id).collect();
        let combined: Vec<String> = search
            .combined_search(&term, &tag, 100)
            .into_iter()
            .map(|p| p.id)
            .collect();

        // Subset, in the same relative order
        let mut cursor = ranked.iter();
        for id in &combined {
            prop_assert!(cursor.any(|r| r == id), "{} not in ranked order", id);
        }
    }

    #[test]
    fn prop_tag_search_is_exact(posts in posts_strategy(), tag in word_strategy()) {
        let engine = engine_with(&posts);
        let results = engine.search_by_tag(&tag);
        let expected: Vec<&str> = posts
            .iter()
            .filter(|p| p.keywords.iter().any(|k| k == &tag))
            .map(|p| p.id.as_str())
            .collect();
        let got: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(got, expected);
        for r in &results {
            prop_assert_eq!(r.score, 1.0);
        }
    }
}
