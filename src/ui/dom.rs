//! A small attribute-based element tree.
//!
//! The controller only ever talks to the page through ids, classes and
//! `data-*` attributes, so this is all the DOM it needs: elements with
//! attributes, text, an input value and a visibility flag. Handles are
//! shared (`Clone` gives another handle to the same node), matching how page
//! elements behave.
//!
//! Selectors are the three forms the controller uses: `#id`, `.class` and
//! `[attribute]`.

use crate::types::PostRecord;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    visible: bool,
    detached: bool,
    children: Vec<Element>,
}

/// Shared handle to one element.
#[derive(Debug, Clone)]
pub struct Element(Arc<RwLock<Node>>);

impl Element {
    pub fn new(tag: &str) -> Self {
        Element(Arc::new(RwLock::new(Node {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            visible: true,
            detached: false,
            children: Vec::new(),
        })))
    }

    /// Stand-in for an element the page did not render. Accepts every write,
    /// lives outside any tree.
    pub fn detached(tag: &str) -> Self {
        let element = Self::new(tag);
        element.0.write().detached = true;
        element
    }

    pub fn with_id(self, id: &str) -> Self {
        self.0.write().id = Some(id.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.write().text = text.to_string();
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn hidden(self) -> Self {
        self.set_visible(false);
        self
    }

    pub fn tag(&self) -> String {
        self.0.read().tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.0.read().id.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.read().classes.iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut node = self.0.write();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.write().classes.retain(|c| c != class);
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.read().attributes.get(name).cloned()
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.0.read().attributes.contains_key(name)
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.0
            .write()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Own text followed by the text of every descendant.
    pub fn text_content(&self) -> String {
        let node = self.0.read();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text_content());
        }
        text
    }

    pub fn set_text(&self, text: &str) {
        self.0.write().text = text.to_string();
    }

    /// Input value (only meaningful for inputs).
    pub fn value(&self) -> String {
        self.0.read().value.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.0.write().value = value.to_string();
    }

    pub fn is_visible(&self) -> bool {
        self.0.read().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.write().visible = visible;
    }

    pub fn is_detached(&self) -> bool {
        self.0.read().detached
    }

    pub fn append_child(&self, child: Element) {
        self.0.write().children.push(child);
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.read().children.clone()
    }

    /// Same underlying node?
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// First descendant (not self) matching `selector`, document order.
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector)?;
        let mut found = None;
        self.walk(&mut |el| {
            if found.is_none() && selector.matches(el) {
                found = Some(el.clone());
            }
        });
        found
    }

    /// Every descendant (not self) matching `selector`, document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if selector.matches(el) {
                found.push(el.clone());
            }
        });
        found
    }

    fn walk(&self, visit: &mut dyn FnMut(&Element)) {
        for child in self.children() {
            visit(&child);
            child.walk(visit);
        }
    }
}

/// `#id`, `.class` or `[attribute]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Attr(String),
}

impl Selector {
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::Class(class.to_string()));
        }
        let attr = selector.strip_prefix('[')?.strip_suffix(']')?;
        (!attr.is_empty()).then(|| Selector::Attr(attr.to_string()))
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id().as_deref() == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Attr(name) => element.has_attr(name),
        }
    }
}

/// Read-only lookups into a rendered page.
pub trait Document: Send + Sync {
    fn get_element_by_id(&self, id: &str) -> Option<Element>;
    fn query_selector(&self, selector: &str) -> Option<Element>;
    fn query_selector_all(&self, selector: &str) -> Vec<Element>;
}

/// A page: a root element and its subtree.
#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
}

impl Page {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl Document for Page {
    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.root.query_selector(&format!("#{}", id))
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.root.query_selector(selector)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        self.root.query_selector_all(selector)
    }
}

/// Build the post list from `[data-post-id]` elements.
///
/// A post rendered in several lists is collected once (first occurrence).
pub fn collect_posts(document: &dyn Document) -> Vec<PostRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut posts = Vec::new();
    for element in document.query_selector_all("[data-post-id]") {
        let id = element.attr("data-post-id").unwrap_or_default();
        if id.is_empty() || !seen.insert(id.clone()) {
            continue;
        }
        let title = element
            .query_selector(".post-title")
            .map(|t| t.text_content())
            .unwrap_or_default();
        let description = element
            .query_selector(".post-description")
            .map(|d| d.text_content())
            .filter(|d| !d.trim().is_empty());
        let keywords = split_keywords(&element.attr("data-keywords").unwrap_or_default());
        posts.push(PostRecord {
            id,
            title,
            description,
            keywords,
        });
    }
    posts
}

/// Comma-separated `data-keywords` value → trimmed, non-blank keywords.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
