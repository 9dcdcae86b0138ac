// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored posts get sorted.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Ordinal** - the post's first insertion slot, ascending
//!
//! The ordinal tiebreak makes ranking a stable sort over insertion order,
//! so two runs over the same index always agree.

use std::cmp::Ordering;

/// A scored post before it is turned into a `SearchResult`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub ordinal: usize,
    pub score: f64,
}

/// Compare two scored posts for ranking (higher score first, then earlier ordinal).
pub fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.ordinal.cmp(&b.ordinal),
    }
}

/// Sort in place and keep the best `limit`.
pub fn rank_top(ranked: &mut Vec<Ranked>, limit: usize) {
    ranked.sort_by(compare_ranked);
    ranked.truncate(limit);
}
