// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow through the search stack.
//!
//! `PostRecord` comes in from the page (or a content collection), the index
//! keeps its own copy, and `SearchResult` goes back out. Results are built
//! fresh for every query and never mutated afterwards.
//!
//! # Invariants
//!
//! - **SearchResult.score**: finite and `>= 0.0`. Higher is more relevant.
//! - **SearchResult.keyword_matches**: no duplicates, in the post's keyword order.
//! - **SearchState**: serializes with camelCase keys (`searchTerm`, `activeTag`,
//!   `viewAll`) because that is the shape persisted in session storage.

use serde::{Deserialize, Serialize};

/// A post as rendered by the page layer.
///
/// `id` is unique and stable across page loads. Keywords keep their original
/// casing; two keywords may collapse to the same value after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PostRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub score: f64,
    pub title_match: bool,
    pub description_match: bool,
    pub keyword_matches: Vec<String>,
    /// Short excerpt around the densest cluster of query terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Index size counters. All zero before anything is indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub total_posts: usize,
    pub indexed_words: usize,
    pub indexed_keywords: usize,
}

/// The session snapshot of what the user is filtering by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub search_term: String,
    pub active_tag: String,
    pub view_all: bool,
}

impl SearchState {
    pub fn new(search_term: impl Into<String>, active_tag: impl Into<String>, view_all: bool) -> Self {
        Self {
            search_term: search_term.into(),
            active_tag: active_tag.into(),
            view_all,
        }
    }

    /// True when nothing is being filtered.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.active_tag.is_empty() && !self.view_all
    }
}
