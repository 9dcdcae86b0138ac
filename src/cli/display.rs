// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the postsearch CLI.
//!
//! OneDark on dark terminals, One Light on light ones. Detection tries
//! `POSTSEARCH_THEME` first, then `COLORFGBG`, then falls back to dark.
//! `NO_COLOR` and non-TTY output get plain text, so piping into a file or
//! `grep` stays clean.

use postsearch::{PostRecord, SearchResult, SearchStats};
use std::sync::OnceLock;

/// Width between the box borders.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("POSTSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg) = bg.parse::<u8>() {
                if bg >= 7 && bg != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text without a color terminal.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut plain text to `max` chars, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn border(glyph: &str) -> String {
    if use_colors() {
        format!("{}{}{}", GRAY(), glyph, RESET)
    } else {
        glyph.to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// ├──────────────────┤
pub fn section_mid() {
    println!("{}", border(&format!("├{}┤", "─".repeat(BOX_WIDTH))));
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Score colored by strength: a title hit alone is 3.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>5.1}", score);
    if score >= 6.0 {
        themed(GREEN, &[BOLD], &text)
    } else if score >= 3.0 {
        themed(GREEN, &[], &text)
    } else if score >= 2.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// `[T] [D] [K]` flags for the fields a result matched in.
pub fn match_badges(result: &SearchResult) -> String {
    let mut badges = Vec::new();
    if result.title_match {
        badges.push(themed(GREEN, &[], "[T]"));
    }
    if result.description_match {
        badges.push(themed(BLUE, &[], "[D]"));
    }
    if !result.keyword_matches.is_empty() {
        badges.push(themed(MAGENTA, &[], "[K]"));
    }
    badges.join(" ")
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// One box per matched post. `result` carries the score when the post came
/// from a ranked search.
pub fn print_post(rank: usize, post: &PostRecord, result: Option<&SearchResult>) {
    let heading = format!("#{} {}", rank, post.id);
    section_top(&heading);

    let title = themed(CYAN, &[BOLD], &truncate(&post.title, BOX_WIDTH - 2));
    row(&format!(" {}", title));

    if let Some(result) = result {
        row(&format!(" score {}  {}", score_value(result.score), match_badges(result)));
        if let Some(snippet) = &result.snippet {
            row(&format!(" {}", themed(GRAY, &[DIM], &truncate(snippet, BOX_WIDTH - 2))));
        }
        if !result.keyword_matches.is_empty() {
            let keywords = truncate(&result.keyword_matches.join(", "), BOX_WIDTH - 12);
            row(&format!(" matched: {}", themed(MAGENTA, &[], &keywords)));
        }
    }

    if !post.keywords.is_empty() {
        section_mid();
        let tags = truncate(&post.keywords.join(", "), BOX_WIDTH - 9);
        row(&format!(" tags: {}", themed(YELLOW, &[], &tags)));
    }
    section_bot();
}

pub fn print_no_results(what: &str) {
    section_top("NO RESULTS");
    row(&format!(" {}", themed(GRAY, &[], &truncate(what, BOX_WIDTH - 2))));
    section_bot();
}

pub fn print_stats(stats: &SearchStats) {
    section_top("INDEX");
    row(&format!(" {:<20}{}", "posts", themed(GREEN, &[BOLD], &stats.total_posts.to_string())));
    row(&format!(" {:<20}{}", "indexed words", themed(BLUE, &[], &stats.indexed_words.to_string())));
    row(&format!(
        " {:<20}{}",
        "indexed keywords",
        themed(MAGENTA, &[], &stats.indexed_keywords.to_string())
    ));
    section_bot();
}
