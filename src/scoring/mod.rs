// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how post results get their numbers.
//!
//! A post's score is a weighted count of matches: title tokens weigh most,
//! keywords next, description tokens least. Ranking sorts by that score and
//! falls back to insertion order, so equal scores never shuffle.

mod core;
pub mod ranking;

pub use core::*;
