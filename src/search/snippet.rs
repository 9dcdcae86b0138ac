//! Result snippets.
//!
//! Picks the 20-word window of the description (or the title, when there is
//! no description) that contains the most distinct query terms, and trims it
//! to roughly 150 bytes on a word boundary.

use crate::types::PostRecord;
use crate::utils::normalize;

/// Words per snippet window.
pub const SNIPPET_WINDOW_WORDS: usize = 20;

/// Soft byte limit before the snippet is cut and suffixed with `...`.
pub const SNIPPET_MAX_BYTES: usize = 150;

/// Build a snippet for `post` around `terms`. `None` when there is no text.
pub fn make_snippet(post: &PostRecord, terms: &[String]) -> Option<String> {
    let text = post
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(&post.title);
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let mut best_pos = 0;
    let mut max_matches = 0;
    for i in 0..words.len() {
        let end = (i + SNIPPET_WINDOW_WORDS).min(words.len());
        let window_text = words[i..end].join(" ");
        let matches = terms
            .iter()
            .filter(|term| window_text.contains(term.as_str()))
            .count();
        // Strictly greater: the earliest window wins ties
        if matches > max_matches {
            max_matches = matches;
            best_pos = i;
        }
    }

    let end = (best_pos + SNIPPET_WINDOW_WORDS).min(words.len());
    let mut snippet = words[best_pos..end].join(" ");

    if snippet.len() > SNIPPET_MAX_BYTES {
        let mut cut = SNIPPET_MAX_BYTES;
        while !snippet.is_char_boundary(cut) {
            cut -= 1;
        }
        snippet.truncate(cut);
        if let Some(last_space) = snippet.rfind(' ') {
            snippet.truncate(last_space);
        }
        snippet.push_str("...");
    }

    Some(snippet)
}
