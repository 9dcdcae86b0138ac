//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Minimum token length (in chars). Single letters are noise for post titles.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Normalize a string for search: lowercase, drop punctuation, collapse whitespace.
///
/// Hyphens survive so compound tags like "open-source" stay one token.
///
/// - "Hello, World!" → "hello world"
/// - "  Rust   & WASM " → "rust wasm"
/// - "café" → "cafe" (with the `unicode-normalization` feature)
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize and filter out combining marks
/// 2. Lowercase
/// 3. Keep alphanumerics, whitespace and `-`
/// 4. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    let folded: String = value.nfd().filter(|c| !is_combining_mark(*c)).collect();
    strip_and_collapse(&folded.to_lowercase())
}

/// Lightweight normalization for WASM (no unicode-normalization dependency).
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    strip_and_collapse(&value.to_lowercase())
}

fn strip_and_collapse(lowered: &str) -> String {
    lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Split text into searchable terms.
///
/// Empty or punctuation-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Query terms: every normalized word, deduplicated, in first-seen order.
///
/// No length filter here. A one-letter term can't hit the token table but
/// can still substring-match a keyword.
pub fn query_terms(query: &str) -> Vec<String> {
    let normalized = normalize(query);
    let mut terms: Vec<String> = Vec::new();
    for word in normalized.split_whitespace() {
        if !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}
