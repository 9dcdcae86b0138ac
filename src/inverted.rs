//! Inverted index construction for posts.
//!
//! Two tables live here:
//!
//! - the **token table**: normalized word → postings `(slot, field)`, one
//!   posting per occurrence, fed by title, description and keyword words.
//!   Queries scan it for tokens containing the term, not just equal to it;
//! - the **keyword table**: whole normalized keyword → slots, used for exact
//!   tag lookups and keyword substring scoring.
//!
//! A *slot* is the position of an `add` call. Adding the same post id twice
//! takes two slots; both resolve to the ordinal of the id's first slot, which
//! is what result ordering uses.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SLOT_VALID**: every slot referenced by either table is `< posts.len()`
//! 2. **NON_EMPTY**: every token / keyword key has at least one entry
//! 3. **KEYWORD_SLOT_UNIQUE**: a slot appears at most once per keyword key
//! 4. **ATOMIC_CLEAR**: `clear` empties posts and both tables together
//!
//! Nothing here removes a single post. Reindexing means `clear` then re-add.

use crate::types::PostRecord;
use crate::utils::{normalize, tokenize};
use std::collections::HashMap;

/// Which part of a post a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Keyword,
}

/// One token occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub slot: usize,
    pub field: Field,
}

/// A keyword as stored for one slot: normalized form plus the original value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedKeyword {
    pub normalized: String,
    pub original: String,
}

#[derive(Debug, Default)]
pub struct PostIndex {
    posts: Vec<PostRecord>,
    /// slot → slot of the first insertion with the same id
    ordinals: Vec<usize>,
    first_slot: HashMap<String, usize>,
    /// slot → keywords in post order, deduplicated by normalized form
    slot_keywords: Vec<Vec<IndexedKeyword>>,
    tokens: HashMap<String, Vec<Posting>>,
    keywords: HashMap<String, Vec<usize>>,
}

impl PostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one post. Never fails: an empty title simply contributes no tokens.
    pub fn add(&mut self, post: &PostRecord) {
        let slot = self.posts.len();
        let ordinal = *self.first_slot.entry(post.id.clone()).or_insert(slot);

        for token in tokenize(&post.title) {
            self.push_posting(token, slot, Field::Title);
        }
        if let Some(description) = &post.description {
            for token in tokenize(description) {
                self.push_posting(token, slot, Field::Description);
            }
        }

        let mut keywords: Vec<IndexedKeyword> = Vec::with_capacity(post.keywords.len());
        for keyword in &post.keywords {
            let normalized = normalize(keyword);
            if normalized.is_empty() || keywords.iter().any(|k| k.normalized == normalized) {
                continue;
            }
            for token in tokenize(keyword) {
                self.push_posting(token, slot, Field::Keyword);
            }
            self.keywords.entry(normalized.clone()).or_default().push(slot);
            keywords.push(IndexedKeyword {
                normalized,
                original: keyword.clone(),
            });
        }

        self.posts.push(post.clone());
        self.ordinals.push(ordinal);
        self.slot_keywords.push(keywords);
    }

    fn push_posting(&mut self, token: String, slot: usize, field: Field) {
        self.tokens.entry(token).or_default().push(Posting { slot, field });
    }

    pub fn clear(&mut self) {
        self.posts.clear();
        self.ordinals.clear();
        self.first_slot.clear();
        self.slot_keywords.clear();
        self.tokens.clear();
        self.keywords.clear();
    }

    /// Number of `add` calls since the last clear.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Unique tokens across all fields.
    pub fn vocabulary_len(&self) -> usize {
        self.tokens.len()
    }

    /// Unique normalized keywords.
    pub fn keyword_len(&self) -> usize {
        self.keywords.len()
    }

    pub fn postings(&self, token: &str) -> &[Posting] {
        self.tokens.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tokens containing `term` as a substring, with their postings.
    pub fn tokens_containing<'a>(
        &'a self,
        term: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [Posting])> + 'a {
        self.tokens
            .iter()
            .filter(move |(token, _)| token.contains(term))
            .map(|(token, postings)| (token.as_str(), postings.as_slice()))
    }

    /// Slots carrying exactly this normalized keyword.
    pub fn keyword_slots(&self, normalized: &str) -> &[usize] {
        self.keywords.get(normalized).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keyword keys containing `term` as a substring, with their slots.
    pub fn keywords_containing<'a>(
        &'a self,
        term: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [usize])> + 'a {
        self.keywords
            .iter()
            .filter(move |(key, _)| key.contains(term))
            .map(|(key, slots)| (key.as_str(), slots.as_slice()))
    }

    pub fn post(&self, slot: usize) -> Option<&PostRecord> {
        self.posts.get(slot)
    }

    /// Ordering key for a slot: the first slot that carried the same id.
    pub fn ordinal(&self, slot: usize) -> usize {
        self.ordinals.get(slot).copied().unwrap_or(slot)
    }

    pub fn slot_keywords(&self, slot: usize) -> &[IndexedKeyword] {
        self.slot_keywords.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check the structural invariants. Used by tests.
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), String> {
        let n = self.posts.len();
        if self.ordinals.len() != n || self.slot_keywords.len() != n {
            return Err(format!(
                "side tables out of step: posts={}, ordinals={}, keywords={}",
                n,
                self.ordinals.len(),
                self.slot_keywords.len()
            ));
        }
        for (token, postings) in &self.tokens {
            if postings.is_empty() {
                return Err(format!("token '{}' has no postings", token));
            }
            if let Some(p) = postings.iter().find(|p| p.slot >= n) {
                return Err(format!("token '{}' points at slot {} of {}", token, p.slot, n));
            }
        }
        for (key, slots) in &self.keywords {
            if slots.is_empty() {
                return Err(format!("keyword '{}' has no slots", key));
            }
            if slots.iter().any(|s| *s >= n) {
                return Err(format!("keyword '{}' points past the post table", key));
            }
            let mut sorted = slots.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() != slots.len() {
                return Err(format!("keyword '{}' lists a slot twice", key));
            }
        }
        Ok(())
    }
}
