// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search UI controller.
//!
//! Binds a [`PostSearch`] façade to the page's search box, tag buttons and
//! view toggle. The index is never built up front: `init()` only restores the
//! saved filter (applied with the substring fallback) and binds events. The
//! first interaction that needs ranking builds the engine through
//! [`LazyInit`]; until it is ready, and forever if it fails, searches go
//! through [`fallback`].
//!
//! # Element contract
//!
//! | Selector                | Required | Role                               |
//! |-------------------------|----------|------------------------------------|
//! | `#search-input`         | yes      | query text                         |
//! | `#search-form`          | yes      | submit target                      |
//! | `#clear-search`         | yes      | visible iff the input is non-empty |
//! | `#reset-filters`        | yes      | reset button                       |
//! | `.no-results`           | yes      | shown when nothing is visible      |
//! | `.post-list`            | yes      | paginated list                     |
//! | `.post-list-all`        | yes      | full list                          |
//! | `#pagination-container` | yes      | pagination links                   |
//! | `.tag-filter[data-tag]` | no       | tag buttons (`data-tag=""` is All) |
//! | `#view-toggle`          | no       | view toggle button                 |
//! | `#pagination-icon`, `#all-icon`, `#view-label` | no | toggle decoration |
//!
//! A missing required element is replaced by a detached placeholder and the
//! controller runs in fallback mode.

pub mod debounce;
pub mod dom;
pub mod fallback;
pub mod lazy;

pub use debounce::Debouncer;
pub use dom::{collect_posts, Document, Element, Page, Selector};
pub use lazy::{InitPhase, LazyInit};

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::facade::PostSearch;
use crate::search::SearchEngine;
use crate::state::{PostSearchState, SessionStorage};
use crate::types::{PostRecord, SearchState};
use futures::future::FutureExt;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

const ITEM_SELECTOR: &str = ".post-dropdown-item";
const LABEL_VIEW_ALL: &str = "View All";
const LABEL_PAGINATE: &str = "Paginate";

/// User interactions the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Search box gained focus.
    Focus,
    /// Search box text changed to the given value.
    Input(String),
    /// Search form submitted.
    Submit,
    /// Clear button clicked.
    Clear,
    /// Tag button clicked (`""` is the All button).
    TagSelected(String),
    /// View toggle clicked.
    ToggleView,
    /// Reset button clicked.
    Reset,
    /// A pagination link was followed.
    Paginate,
}

/// Elements the controller drives, resolved once at construction.
#[derive(Debug, Clone)]
pub struct UiElements {
    pub search_input: Element,
    pub search_form: Element,
    pub clear_button: Element,
    pub reset_button: Element,
    pub tag_buttons: Vec<Element>,
    pub no_results: Element,
    pub post_list: Element,
    pub post_list_all: Element,
    pub pagination_container: Element,
    pub view_toggle: Option<Element>,
    pub pagination_icon: Option<Element>,
    pub all_icon: Option<Element>,
    pub view_label: Option<Element>,
    pub pagination_links: Vec<Element>,
}

impl UiElements {
    /// Look everything up. Returns the selectors of missing required
    /// elements alongside the (placeholder-patched) set.
    pub fn resolve(document: &dyn Document) -> (Self, Vec<&'static str>) {
        let mut missing = Vec::new();
        let mut required = |selector: &'static str, tag: &str| {
            let found = if let Some(id) = selector.strip_prefix('#') {
                document.get_element_by_id(id)
            } else {
                document.query_selector(selector)
            };
            found.unwrap_or_else(|| {
                log::warn!("Required element {} not found, using a detached placeholder", selector);
                missing.push(selector);
                Element::detached(tag)
            })
        };

        let search_input = required("#search-input", "input");
        let search_form = required("#search-form", "form");
        let clear_button = required("#clear-search", "button");
        let reset_button = required("#reset-filters", "button");
        let no_results = required(".no-results", "div");
        let post_list = required(".post-list", "ul");
        let post_list_all = required(".post-list-all", "ul");
        let pagination_container = required("#pagination-container", "div");

        let tag_buttons = document.query_selector_all(".tag-filter");
        if tag_buttons.is_empty() {
            log::warn!("No .tag-filter elements found, tag filtering is disabled");
        }

        let optional = |id: &str, what: &str| {
            let found = document.get_element_by_id(id);
            if found.is_none() {
                log::warn!("Optional element #{} not found, {} is disabled", id, what);
            }
            found
        };

        let elements = Self {
            search_input,
            search_form,
            clear_button,
            reset_button,
            tag_buttons,
            no_results,
            post_list,
            post_list_all,
            pagination_container,
            view_toggle: optional("view-toggle", "view toggle"),
            pagination_icon: optional("pagination-icon", "icon switching"),
            all_icon: optional("all-icon", "icon switching"),
            view_label: optional("view-label", "label switching"),
            pagination_links: document.query_selector_all(".pagination-link"),
        };
        (elements, missing)
    }
}

#[derive(Debug, Default)]
struct ViewState {
    view_all: bool,
    active_tag: String,
}

pub struct PostSearchUi<B: SearchBackend = SearchEngine> {
    elements: UiElements,
    search: Arc<PostSearch<B>>,
    posts: Vec<PostRecord>,
    store: PostSearchState,
    config: SearchConfig,
    lazy: LazyInit,
    debouncer: Debouncer,
    view: Mutex<ViewState>,
    fallback: AtomicBool,
    bound: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<B: SearchBackend> PostSearchUi<B> {
    /// Resolve elements and wire collaborators. Nothing is indexed here.
    pub fn new(
        document: &dyn Document,
        posts: Vec<PostRecord>,
        search: Arc<PostSearch<B>>,
        storage: Arc<dyn SessionStorage>,
        config: SearchConfig,
    ) -> Self {
        let (elements, missing) = UiElements::resolve(document);
        if !missing.is_empty() {
            log::warn!("Using fallback DOM-based search ({} elements missing)", missing.len());
        }
        Self {
            elements,
            search,
            posts,
            store: PostSearchState::with_key(storage, config.storage_key.clone()),
            debouncer: Debouncer::new(config.debounce()),
            config,
            lazy: LazyInit::new(),
            view: Mutex::new(ViewState::default()),
            fallback: AtomicBool::new(!missing.is_empty()),
            bound: AtomicBool::new(false),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// [`PostSearchUi::new`] with the posts harvested from the page itself.
    pub fn from_document(
        document: &dyn Document,
        search: Arc<PostSearch<B>>,
        storage: Arc<dyn SessionStorage>,
        config: SearchConfig,
    ) -> Self {
        let posts = collect_posts(document);
        Self::new(document, posts, search, storage, config)
    }

    /// Restore the saved filter, reflect it into the page and start
    /// listening. Does not build the index.
    pub fn init(&self) {
        let saved = self.store.get_search_state();
        {
            let mut view = self.view.lock();
            view.view_all = saved.view_all;
            view.active_tag = saved.active_tag.clone();
        }

        if !saved.search_term.is_empty() {
            self.elements.search_input.set_value(&saved.search_term);
        }
        self.elements
            .clear_button
            .set_visible(!self.elements.search_input.value().is_empty());
        self.mark_active_tag(&saved.active_tag);

        self.bound.store(true, Ordering::Release);
        self.apply_view_mode(saved.view_all);
        self.run_search();
        log::info!("post search UI initialized");
    }

    /// Feed one interaction to the controller. Ignored unless bound.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(self: &Arc<Self>, event: UiEvent) {
        if !self.is_bound() {
            log::debug!("ignoring {:?}: listeners not bound", event);
            return;
        }

        match event {
            UiEvent::Focus => {
                if !self.is_fallback() && self.lazy.phase() == InitPhase::Uninitialized {
                    let ui = Arc::clone(self);
                    self.track(tokio::spawn(async move {
                        ui.ensure_engine().await;
                    }));
                }
            }
            UiEvent::Input(value) => {
                self.elements.search_input.set_value(&value);
                self.elements.clear_button.set_visible(!value.is_empty());
                let ui = Arc::clone(self);
                self.debouncer.schedule(async move { ui.search_with_engine().await });
            }
            UiEvent::Submit => {
                self.debouncer.cancel();
                self.spawn_search();
            }
            UiEvent::Clear => {
                self.debouncer.cancel();
                self.elements.search_input.set_value("");
                self.spawn_search();
            }
            UiEvent::TagSelected(tag) => self.select_tag(tag),
            UiEvent::ToggleView if self.elements.view_toggle.is_none() => {
                log::debug!("ignoring view toggle: no #view-toggle on the page");
            }
            UiEvent::ToggleView => {
                let view_all = !self.view.lock().view_all;
                self.apply_view_mode(view_all);
                self.spawn_search();
            }
            UiEvent::Reset => self.reset(),
            UiEvent::Paginate => self.save_current_state(),
        }
    }

    /// Unbind listeners, drop a pending debounced search and abort spawned
    /// searches so nothing touches the page or storage afterwards.
    pub fn cleanup(&self) {
        self.bound.store(false, Ordering::Release);
        self.debouncer.abort();
        for task in std::mem::take(&mut *self.tasks.lock()) {
            task.abort();
        }
        log::debug!("post search UI listeners removed");
    }

    /// Clear the input and tag, forget the saved state, search again.
    pub fn reset(self: &Arc<Self>) {
        self.debouncer.cancel();
        self.elements.search_input.set_value("");
        self.view.lock().active_tag.clear();
        self.mark_active_tag("");
        self.store.clear_search_state();
        self.spawn_search();
    }

    /// Wait until the pending debounced search and any spawned work finish.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
        loop {
            let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                if let Err(e) = task.await {
                    if e.is_panic() {
                        log::error!("search task panicked: {}", e);
                    }
                }
            }
        }
    }

    pub fn phase(&self) -> InitPhase {
        self.lazy.phase()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.load(Ordering::Acquire)
    }

    pub fn is_bound(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }

    pub fn is_viewing_all(&self) -> bool {
        self.view.lock().view_all
    }

    pub fn active_tag(&self) -> String {
        self.view.lock().active_tag.clone()
    }

    /// The current filter as it would be persisted.
    pub fn search_state(&self) -> SearchState {
        let view = self.view.lock();
        SearchState::new(
            self.elements.search_input.value(),
            view.active_tag.clone(),
            view.view_all,
        )
    }

    pub fn elements(&self) -> &UiElements {
        &self.elements
    }

    pub fn search(&self) -> &Arc<PostSearch<B>> {
        &self.search
    }

    /// Build the engine once. Returns whether it is usable; a failure
    /// switches the controller to fallback for good.
    pub async fn ensure_engine(&self) -> bool {
        if self.is_fallback() {
            return false;
        }
        let search = Arc::clone(&self.search);
        let posts = self.posts.clone();
        let outcome = self
            .lazy
            .ensure_ready(move || async move { search.init(posts).await }.boxed())
            .await;
        match outcome {
            Ok(()) => true,
            Err(e) => {
                if !self.fallback.swap(true, Ordering::AcqRel) {
                    log::error!("Failed to lazy-load search engine: {}", e);
                }
                false
            }
        }
    }

    fn select_tag(self: &Arc<Self>, tag: String) {
        self.mark_active_tag(&tag);
        let switch_view = {
            let mut view = self.view.lock();
            view.active_tag = tag.clone();
            !tag.is_empty() && !view.view_all
        };
        // A filtered set rarely fits the paginated page
        if switch_view {
            self.apply_view_mode(true);
        }
        self.spawn_search();
    }

    fn mark_active_tag(&self, tag: &str) {
        for button in &self.elements.tag_buttons {
            if button.attr("data-tag").unwrap_or_default() == tag {
                button.add_class("active");
            } else {
                button.remove_class("active");
            }
        }
    }

    /// Switch between the paginated and the full list.
    fn apply_view_mode(&self, view_all: bool) {
        self.view.lock().view_all = view_all;

        let el = &self.elements;
        el.post_list.set_visible(!view_all);
        el.post_list_all.set_visible(view_all);
        el.pagination_container.set_visible(!view_all);
        if let Some(icon) = &el.pagination_icon {
            icon.set_visible(!view_all);
        }
        if let Some(icon) = &el.all_icon {
            icon.set_visible(view_all);
        }
        if let Some(label) = &el.view_label {
            label.set_text(if view_all { LABEL_PAGINATE } else { LABEL_VIEW_ALL });
        }
    }

    fn spawn_search(self: &Arc<Self>) {
        let ui = Arc::clone(self);
        self.track(tokio::spawn(async move { ui.search_with_engine().await }));
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);
    }

    /// Build the engine first when the filter needs ranking, then search.
    async fn search_with_engine(&self) {
        let term_set = !self.elements.search_input.value().trim().is_empty();
        let tag_set = !self.view.lock().active_tag.is_empty();
        if term_set || tag_set {
            self.ensure_engine().await;
        }
        self.run_search();
    }

    fn run_search(&self) {
        if !self.is_fallback() && self.lazy.is_ready() {
            self.engine_search();
        } else {
            self.basic_search();
        }
        self.save_current_state();
    }

    fn engine_search(&self) {
        let term = self.elements.search_input.value().to_lowercase();
        let term = term.trim();
        let (view_all, tag) = {
            let view = self.view.lock();
            (view.view_all, view.active_tag.clone())
        };

        let matched = self.search.combined_search(term, &tag, self.config.max_results);
        let displaying_all = view_all || !term.is_empty();
        self.show_lists(displaying_all);

        // The paginated list may still carry visibility from a fallback pass
        let ids: HashSet<&str> = matched.iter().map(|p| p.id.as_str()).collect();
        let visible = show_matching(self.displayed_list(displaying_all), &ids);

        self.elements.no_results.set_visible(visible == 0);
        self.sync_clear_button();
    }

    fn basic_search(&self) {
        let term = self.elements.search_input.value().to_lowercase();
        let term = term.trim();
        let (view_all, tag) = {
            let view = self.view.lock();
            (view.view_all, view.active_tag.clone())
        };

        let displaying_all = view_all || !term.is_empty();
        self.show_lists(displaying_all);

        let list = self.displayed_list(displaying_all);
        let visible = fallback::filter_items(&list.query_selector_all(ITEM_SELECTOR), term, &tag);

        self.elements.no_results.set_visible(visible == 0);
        self.sync_clear_button();
    }

    fn displayed_list(&self, displaying_all: bool) -> &Element {
        if displaying_all {
            &self.elements.post_list_all
        } else {
            &self.elements.post_list
        }
    }

    fn show_lists(&self, displaying_all: bool) {
        self.elements.post_list.set_visible(!displaying_all);
        self.elements.post_list_all.set_visible(displaying_all);
        self.elements.pagination_container.set_visible(!displaying_all);
    }

    fn sync_clear_button(&self) {
        let has_text = !self.elements.search_input.value().is_empty();
        self.elements.clear_button.set_visible(has_text);
    }

    fn save_current_state(&self) {
        let state = self.search_state();
        self.store
            .set_search_state(&state.search_term, &state.active_tag, state.view_all);
    }
}

/// Show the items of `list` whose id is in `ids`, hide the rest. Returns how
/// many are visible.
fn show_matching(list: &Element, ids: &HashSet<&str>) -> usize {
    let mut visible = 0;
    for item in list.query_selector_all(ITEM_SELECTOR) {
        let id = item.attr("data-post-id").unwrap_or_default();
        let show = ids.contains(id.as_str());
        item.set_visible(show);
        if show {
            visible += 1;
        }
    }
    visible
}
