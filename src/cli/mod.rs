// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the postsearch command-line interface.
//!
//! Every subcommand reads a JSON array of posts, builds the index through the
//! same façade the browser uses, and either prints boxed results or, with
//! `--json`, machine-readable output.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "postsearch",
    about = "Search a post collection by text and tag",
    version
)]
pub struct Cli {
    /// JSON config file (max_results, default_limit, debounce_ms, storage_key)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ranked text search, optionally narrowed by a tag
    Search {
        /// JSON file holding an array of posts
        posts: PathBuf,

        /// Search query (may be empty to list every post)
        query: String,

        /// Only keep results whose matched keywords contain this tag
        #[arg(short, long, default_value = "")]
        tag: String,

        /// Maximum number of results (overrides default_limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of boxes
        #[arg(long)]
        json: bool,
    },

    /// Posts carrying an exact tag
    Tag {
        /// JSON file holding an array of posts
        posts: PathBuf,

        /// Tag to look up (case-insensitive)
        tag: String,

        /// Print JSON instead of boxes
        #[arg(long)]
        json: bool,
    },

    /// Index statistics
    Stats {
        /// JSON file holding an array of posts
        posts: PathBuf,

        /// Print JSON instead of boxes
        #[arg(long)]
        json: bool,
    },
}
