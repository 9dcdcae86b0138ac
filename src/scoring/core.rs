// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind post ranking.
//!
//! For each query term, a post earns:
//!
//! ```text
//! 3 × (title tokens containing the term)
//! 1 × (description tokens containing the term)
//! 2 × (distinct keywords whose normalized form contains the term)
//! ```
//!
//! Token counts are per occurrence, so a title that says "rust" twice earns
//! twice. A hit may be the whole token or a substring of it ("script" inside
//! "javascript"). Keywords count once per keyword either way.
//!
//! # Constants
//!
//! | Field       | Weight | Why this value |
//! |-------------|--------|----------------|
//! | Title       | 3.0    | One title hit beats two description hits |
//! | Keyword     | 2.0    | Authored tags are a strong topical signal |
//! | Description | 1.0    | Baseline |
//!
//! The one ordering guarantee callers lean on: a post whose title holds the
//! term outranks a post where only the description does.

use crate::inverted::Field;

/// Weight of one title token hit.
pub const TITLE_WEIGHT: f64 = 3.0;

/// Weight of one keyword hit.
pub const KEYWORD_WEIGHT: f64 = 2.0;

/// Weight of one description token hit.
pub const DESCRIPTION_WEIGHT: f64 = 1.0;

/// Score for every tag-lookup result.
pub const TAG_MATCH_SCORE: f64 = 1.0;

/// Weight contributed by one hit in `field`.
pub fn field_weight(field: Field) -> f64 {
    match field {
        Field::Title => TITLE_WEIGHT,
        Field::Description => DESCRIPTION_WEIGHT,
        Field::Keyword => KEYWORD_WEIGHT,
    }
}

/// Running tally for one post during a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub title_match: bool,
    pub description_match: bool,
    /// Slot/keyword-position pairs that matched; resolved to values at the end.
    pub keyword_hits: Vec<(usize, usize)>,
}

impl ScoreCard {
    /// Record one token hit. Keyword hits go through [`ScoreCard::record_keyword`].
    pub fn record_token(&mut self, field: Field) {
        let weight = field_weight(field);
        self.score += weight;
        match field {
            Field::Title => self.title_match = true,
            Field::Description => self.description_match = true,
            Field::Keyword => {}
        }
    }

    /// Record a keyword hit for `(slot, keyword position)`.
    pub fn record_keyword(&mut self, slot: usize, position: usize) {
        self.score += KEYWORD_WEIGHT;
        if !self.keyword_hits.contains(&(slot, position)) {
            self.keyword_hits.push((slot, position));
        }
    }

    /// Final score, clamped to a finite non-negative number.
    pub fn final_score(&self) -> f64 {
        if self.score.is_finite() && self.score > 0.0 {
            self.score
        } else {
            0.0
        }
    }
}
