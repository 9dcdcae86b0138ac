// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: the index plus the two ways of asking it things.
//!
//! Free-text search tokenizes the query, tallies weighted hits per post and
//! ranks them. A term hits every indexed token it is a substring of, so
//! "script" finds "JavaScript" the same way the plain substring filter does. Tag search is a straight lookup in the keyword table. Both are
//! total: any string in, a (possibly empty) list out.

pub mod snippet;

use crate::inverted::{Field, PostIndex};
use crate::scoring::ranking::{rank_top, Ranked};
use crate::scoring::{ScoreCard, TAG_MATCH_SCORE};
use crate::types::{PostRecord, SearchResult, SearchStats};
use crate::utils::{normalize, query_terms};
use crate::SearchError;
use std::collections::HashMap;

pub use snippet::make_snippet;

/// In-memory post search engine.
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: PostIndex,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post to the index.
    ///
    /// No dedup: adding the same id twice doubles its weight. Clear first
    /// when reindexing a full set.
    pub fn add_post(&mut self, post: &PostRecord) {
        self.index.add(post);
    }

    /// Add a post given as JSON (the shape the page layer hands over).
    pub fn add_post_json(&mut self, json: &str) -> Result<(), SearchError> {
        let post: PostRecord =
            serde_json::from_str(json).map_err(|e| SearchError::InvalidPost(e.to_string()))?;
        self.add_post(&post);
        Ok(())
    }

    /// Ranked free-text search.
    ///
    /// Returns at most `max_results` hits, best first, ties in insertion order.
    /// A blank query returns nothing without touching the index.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        if query.trim().is_empty() || max_results == 0 {
            return Vec::new();
        }
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut cards: HashMap<usize, ScoreCard> = HashMap::new();
        for term in &terms {
            for (_, postings) in self.index.tokens_containing(term) {
                for posting in postings {
                    // Keyword weight comes from the keyword table below, once per keyword
                    if posting.field == Field::Keyword {
                        continue;
                    }
                    cards
                        .entry(self.index.ordinal(posting.slot))
                        .or_default()
                        .record_token(posting.field);
                }
            }

            for (key, slots) in self.index.keywords_containing(term) {
                for &slot in slots {
                    let Some(position) = self
                        .index
                        .slot_keywords(slot)
                        .iter()
                        .position(|k| k.normalized == key)
                    else {
                        continue;
                    };
                    cards
                        .entry(self.index.ordinal(slot))
                        .or_default()
                        .record_keyword(slot, position);
                }
            }
        }

        let mut ranked: Vec<Ranked> = cards
            .iter()
            .map(|(ordinal, card)| Ranked {
                ordinal: *ordinal,
                score: card.final_score(),
            })
            .filter(|r| r.score > 0.0)
            .collect();
        rank_top(&mut ranked, max_results);

        ranked
            .into_iter()
            .filter_map(|r| {
                let card = cards.get(&r.ordinal)?;
                let post = self.index.post(r.ordinal)?;
                Some(SearchResult {
                    id: post.id.clone(),
                    score: r.score,
                    title_match: card.title_match,
                    description_match: card.description_match,
                    keyword_matches: self.keyword_values(card),
                    snippet: make_snippet(post, &terms),
                })
            })
            .collect()
    }

    /// Resolve keyword hits to stored values, in post keyword order, no repeats.
    fn keyword_values(&self, card: &ScoreCard) -> Vec<String> {
        let mut hits = card.keyword_hits.clone();
        hits.sort_unstable();
        let mut values: Vec<String> = Vec::with_capacity(hits.len());
        for (slot, position) in hits {
            if let Some(keyword) = self.index.slot_keywords(slot).get(position) {
                if !values.contains(&keyword.original) {
                    values.push(keyword.original.clone());
                }
            }
        }
        values
    }

    /// Exact (case-insensitive) tag lookup.
    ///
    /// Every hit scores [`TAG_MATCH_SCORE`] and lists the keyword as the post
    /// stored it. Each post id appears once, in insertion order.
    pub fn search_by_tag(&self, tag: &str) -> Vec<SearchResult> {
        let normalized = normalize(tag);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut ordinals: Vec<(usize, usize)> = self
            .index
            .keyword_slots(&normalized)
            .iter()
            .map(|&slot| (self.index.ordinal(slot), slot))
            .collect();
        ordinals.sort_unstable();
        ordinals.dedup_by_key(|(ordinal, _)| *ordinal);

        ordinals
            .into_iter()
            .filter_map(|(ordinal, slot)| {
                let post = self.index.post(ordinal)?;
                let stored = self
                    .index
                    .slot_keywords(slot)
                    .iter()
                    .find(|k| k.normalized == normalized)
                    .map_or_else(|| tag.to_string(), |k| k.original.clone());
                Some(SearchResult {
                    id: post.id.clone(),
                    score: TAG_MATCH_SCORE,
                    title_match: false,
                    description_match: false,
                    keyword_matches: vec![stored],
                    snippet: None,
                })
            })
            .collect()
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            total_posts: self.index.len(),
            indexed_words: self.index.vocabulary_len(),
            indexed_keywords: self.index.keyword_len(),
        }
    }

    /// Drop every indexed post. The engine stays usable.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Read access to the underlying tables.
    pub fn index(&self) -> &PostIndex {
        &self.index
    }
}
