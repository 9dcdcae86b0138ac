//! Substring filtering straight off the rendered list.
//!
//! Used whenever the engine is not ready or could not be built. No index, no
//! ranking: a post is shown when its title or description contains the term
//! (case-insensitive) and, if a tag is active, one of its `data-keywords`
//! entries equals the tag.

use super::dom::{split_keywords, Element};
use crate::types::PostRecord;

/// Does `post` pass the basic filter? `term` and `tag` are matched
/// case-insensitively; blank means "no constraint".
pub fn matches_post(post: &PostRecord, term: &str, tag: &str) -> bool {
    matches_text(
        &post.title,
        post.description.as_deref().unwrap_or(""),
        &post.keywords,
        term,
        tag,
    )
}

fn matches_text(title: &str, description: &str, keywords: &[String], term: &str, tag: &str) -> bool {
    let term = term.trim().to_lowercase();
    let tag = tag.trim().to_lowercase();

    let matches_search = term.is_empty()
        || title.to_lowercase().contains(&term)
        || description.to_lowercase().contains(&term);
    let matches_tag = tag.is_empty() || keywords.iter().any(|k| k.to_lowercase() == tag);

    matches_search && matches_tag
}

/// Show matching `items`, hide the rest. Returns how many are visible.
///
/// Items without a `.post-title` are left untouched and not counted.
pub fn filter_items(items: &[Element], term: &str, tag: &str) -> usize {
    let mut visible = 0;
    for item in items {
        let Some(title) = item.query_selector(".post-title") else {
            continue;
        };
        let description = item
            .query_selector(".post-description")
            .map(|d| d.text_content())
            .unwrap_or_default();
        let keywords = split_keywords(&item.attr("data-keywords").unwrap_or_default());

        let show = matches_text(&title.text_content(), &description, &keywords, term, tag);
        item.set_visible(show);
        if show {
            visible += 1;
        }
    }
    visible
}
