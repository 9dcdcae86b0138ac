// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search façade: one index, guarded lifecycle, failures absorbed.
//!
//! `PostSearch` owns its backend exclusively. Population happens only in
//! [`PostSearch::init`], once; afterwards every call is a read. Query methods
//! come in pairs: `try_*` returns the typed error, the plain form logs it and
//! returns an empty value so the UI never sees a failure.
//!
//! # Combined search policy
//!
//! | term  | tag   | result                                              |
//! |-------|-------|-----------------------------------------------------|
//! | empty | empty | every known post, original order, unscored          |
//! | set   | empty | ranked free-text search                             |
//! | empty | set   | exact tag search                                    |
//! | set   | set   | free-text search narrowed to results whose keyword matches contain the tag |
//!
//! The tag only ever narrows; it never adds posts the text search missed.

use crate::backend::SearchBackend;
use crate::config::DEFAULT_LIMIT;
use crate::search::SearchEngine;
use crate::types::{PostRecord, SearchResult, SearchStats};
use crate::SearchError;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct PostSearch<B: SearchBackend = SearchEngine> {
    backend: RwLock<B>,
    posts: RwLock<Vec<PostRecord>>,
    initialized: AtomicBool,
    default_limit: usize,
}

impl Default for PostSearch<SearchEngine> {
    fn default() -> Self {
        Self::new(SearchEngine::new())
    }
}

impl<B: SearchBackend> PostSearch<B> {
    /// Wrap a backend. Nothing is indexed until [`PostSearch::init`].
    pub fn new(backend: B) -> Self {
        Self {
            backend: RwLock::new(backend),
            posts: RwLock::new(Vec::new()),
            initialized: AtomicBool::new(false),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Result cap used by [`PostSearch::search_default`].
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Load the backend and index `posts`. A no-op once initialized.
    ///
    /// The backend is cleared before the first post goes in, so a backend
    /// that already holds entries from an earlier owner starts clean. On
    /// failure the façade stays uninitialized.
    pub async fn init(&self, posts: Vec<PostRecord>) -> Result<(), SearchError> {
        if self.is_initialized() {
            log::debug!("search engine already initialized");
            return Ok(());
        }

        let load = self.backend.read().load();
        if let Err(e) = load.await {
            log::error!("search engine initialization failed: {}", e);
            return Err(e);
        }

        let mut backend = self.backend.write();
        // Lost a race with a concurrent init while loading
        if self.is_initialized() {
            return Ok(());
        }
        if let Err(e) = backend.clear() {
            log::error!("search engine initialization failed: {}", e);
            return Err(e);
        }
        for post in &posts {
            if let Err(e) = backend.add_post(post) {
                log::error!("Failed to index post {}: {}", post.id, e);
            }
        }

        // Publish before releasing the write lock so a racing init sees it
        let count = posts.len();
        *self.posts.write() = posts;
        self.initialized.store(true, Ordering::Release);
        drop(backend);
        log::info!("search engine initialized with {} posts", count);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn try_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if !self.is_initialized() {
            return Err(SearchError::NotInitialized);
        }
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.backend.read().search(query, max_results)
    }

    /// Ranked free-text search; empty on any failure.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        absorb(self.try_search(query, max_results), "search")
    }

    /// [`PostSearch::search`] with the configured default limit.
    pub fn search_default(&self, query: &str) -> Vec<SearchResult> {
        self.search(query, self.default_limit)
    }

    pub fn try_search_by_tag(&self, tag: &str) -> Result<Vec<SearchResult>, SearchError> {
        if !self.is_initialized() {
            return Err(SearchError::NotInitialized);
        }
        if tag.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.backend.read().search_by_tag(tag)
    }

    /// Exact tag search; empty on any failure.
    pub fn search_by_tag(&self, tag: &str) -> Vec<SearchResult> {
        absorb(self.try_search_by_tag(tag), "tag search")
    }

    /// Map results back to the cached post records, keeping result order.
    /// Ids with no cached post are dropped.
    pub fn get_posts_from_results(&self, results: &[SearchResult]) -> Vec<PostRecord> {
        let posts = self.posts.read();
        let by_id: HashMap<&str, &PostRecord> =
            posts.iter().rev().map(|p| (p.id.as_str(), p)).collect();
        results
            .iter()
            .filter_map(|r| by_id.get(r.id.as_str()).map(|p| (*p).clone()))
            .collect()
    }

    /// Free-text and tag filtering merged per the policy in the module docs.
    pub fn combined_search(
        &self,
        search_term: &str,
        active_tag: &str,
        max_results: usize,
    ) -> Vec<PostRecord> {
        let term = search_term.trim();
        let tag = active_tag.trim();

        let results = if !term.is_empty() {
            let results = self.search(term, max_results);
            if tag.is_empty() {
                results
            } else {
                let needle = tag.to_lowercase();
                results
                    .into_iter()
                    .filter(|r| {
                        r.keyword_matches
                            .iter()
                            .any(|k| k.to_lowercase().contains(&needle))
                    })
                    .collect()
            }
        } else if !tag.is_empty() {
            self.search_by_tag(tag)
        } else {
            return self.posts();
        };

        self.get_posts_from_results(&results)
    }

    pub fn try_stats(&self) -> Result<SearchStats, SearchError> {
        if !self.is_initialized() {
            return Ok(SearchStats::default());
        }
        self.backend.read().stats()
    }

    /// Index counters; all zero before init or on failure.
    pub fn stats(&self) -> SearchStats {
        self.try_stats().unwrap_or_else(|e| {
            log::warn!("stats unavailable: {}", e);
            SearchStats::default()
        })
    }

    /// Copy of the posts handed to `init`, in their original order.
    pub fn posts(&self) -> Vec<PostRecord> {
        self.posts.read().clone()
    }

    /// Read access to the backend.
    pub fn backend(&self) -> RwLockReadGuard<'_, B> {
        self.backend.read()
    }
}

fn absorb(outcome: Result<Vec<SearchResult>, SearchError>, what: &str) -> Vec<SearchResult> {
    match outcome {
        Ok(results) => results,
        Err(SearchError::NotInitialized) => {
            log::debug!("{} before init, returning no results", what);
            Vec::new()
        }
        Err(e) => {
            log::warn!("{} failed: {}", what, e);
            Vec::new()
        }
    }
}
