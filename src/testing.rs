//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation. It holds
//! the canonical post fixtures and a page builder that renders posts the way
//! the site templates do, so UI tests start from a realistic element tree.

#![doc(hidden)]

use crate::types::PostRecord;
use crate::ui::dom::{Element, Page};

/// The two-post scenario used throughout the docs.
pub fn scenario_posts() -> Vec<PostRecord> {
    vec![
        PostRecord::new("p1", "JavaScript Testing")
            .with_description("Learn about testing in JavaScript")
            .with_keywords(["javascript", "testing"]),
        PostRecord::new("p2", "TypeScript Guide")
            .with_description("TypeScript development guide")
            .with_keywords(["typescript"]),
    ]
}

/// A small blog with overlapping tags and one post without a description.
pub fn blog_posts() -> Vec<PostRecord> {
    vec![
        PostRecord::new("rust-ownership", "Understanding Rust Ownership")
            .with_description("Borrowing, lifetimes and moves explained with examples")
            .with_keywords(["Rust", "memory"]),
        PostRecord::new("wasm-search", "Client-side Search with WebAssembly")
            .with_description("Shipping a Rust search index to the browser")
            .with_keywords(["rust", "wasm", "search"]),
        PostRecord::new("nix-flakes", "Nix Flakes in Practice")
            .with_description("Reproducible development shells")
            .with_keywords(["nix", "devops"]),
        PostRecord::new("notes", "Weekly Notes").with_keywords(["personal"]),
    ]
}

/// One `.post-dropdown-item` the way the templates render it.
pub fn post_item(post: &PostRecord) -> Element {
    let mut item = Element::new("li")
        .with_class("post-dropdown-item")
        .with_attr("data-post-id", &post.id)
        .with_attr("data-keywords", &post.keywords.join(","))
        .with_child(Element::new("a").with_class("post-title").with_text(&post.title));
    if let Some(description) = &post.description {
        item = item.with_child(
            Element::new("p")
                .with_class("post-description")
                .with_text(description),
        );
    }
    item
}

/// Which optional parts [`render_page`] should leave out.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub without_search_input: bool,
    pub without_view_toggle: bool,
}

/// A complete search page: form, tag buttons, both post lists, pagination.
///
/// The paginated list shows the first `page_size` posts; the full list shows
/// all of them.
pub fn render_page(posts: &[PostRecord], page_size: usize, options: PageOptions) -> Page {
    let mut form = Element::new("form").with_id("search-form");
    if !options.without_search_input {
        form = form.with_child(Element::new("input").with_id("search-input"));
    }
    form = form.with_child(Element::new("button").with_id("clear-search").hidden());

    let mut tags = Element::new("div")
        .with_class("tags")
        .with_child(tag_button(""));
    let mut seen = Vec::new();
    for post in posts {
        for keyword in &post.keywords {
            if !seen.contains(keyword) {
                seen.push(keyword.clone());
                tags = tags.with_child(tag_button(keyword));
            }
        }
    }

    let mut paged = Element::new("ul").with_class("post-list");
    for post in posts.iter().take(page_size) {
        paged = paged.with_child(post_item(post));
    }
    let mut all = Element::new("ul").with_class("post-list-all").hidden();
    for post in posts {
        all = all.with_child(post_item(post));
    }

    let mut controls = Element::new("div")
        .with_child(Element::new("button").with_id("reset-filters"));
    if !options.without_view_toggle {
        controls = controls.with_child(
            Element::new("button")
                .with_id("view-toggle")
                .with_child(Element::new("span").with_id("pagination-icon"))
                .with_child(Element::new("span").with_id("all-icon").hidden())
                .with_child(Element::new("span").with_id("view-label").with_text("View All")),
        );
    }

    let root = Element::new("body")
        .with_child(form)
        .with_child(tags)
        .with_child(controls)
        .with_child(Element::new("div").with_class("no-results").hidden())
        .with_child(paged)
        .with_child(all)
        .with_child(
            Element::new("nav").with_id("pagination-container").with_child(
                Element::new("a")
                    .with_class("pagination-link")
                    .with_attr("href", "/posts/2"),
            ),
        );
    Page::new(root)
}

fn tag_button(tag: &str) -> Element {
    Element::new("button")
        .with_class("tag-filter")
        .with_attr("data-tag", tag)
        .with_text(if tag.is_empty() { "All" } else { tag })
}

/// Ids of the visible items in `list`.
pub fn visible_ids(list: &Element) -> Vec<String> {
    list.query_selector_all(".post-dropdown-item")
        .into_iter()
        .filter(|item| item.is_visible())
        .filter_map(|item| item.attr("data-post-id"))
        .collect()
}
