//! The seam between the façade and whatever actually holds the index.
//!
//! [`SearchEngine`] is the in-process implementation and never fails. The
//! trait still speaks `Result` because a real backend may sit behind a module
//! load (a WASM fetch, a worker) that can fail, and the façade has to absorb
//! those failures without caring where they came from.

use crate::search::SearchEngine;
use crate::types::{PostRecord, SearchResult, SearchStats};
use crate::SearchError;
use futures::future::{self, BoxFuture, FutureExt};

pub trait SearchBackend: Send + Sync + 'static {
    /// Bring the backing resource up. Called once per façade `init`, before
    /// any post is added.
    ///
    /// The returned future owns everything it needs, so no lock on the
    /// backend is held while it runs.
    fn load(&self) -> BoxFuture<'static, Result<(), SearchError>> {
        future::ready(Ok(())).boxed()
    }

    fn add_post(&mut self, post: &PostRecord) -> Result<(), SearchError>;

    fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError>;

    fn search_by_tag(&self, tag: &str) -> Result<Vec<SearchResult>, SearchError>;

    fn stats(&self) -> Result<SearchStats, SearchError>;

    fn clear(&mut self) -> Result<(), SearchError>;
}

impl SearchBackend for SearchEngine {
    fn add_post(&mut self, post: &PostRecord) -> Result<(), SearchError> {
        SearchEngine::add_post(self, post);
        Ok(())
    }

    fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        Ok(SearchEngine::search(self, query, max_results))
    }

    fn search_by_tag(&self, tag: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(SearchEngine::search_by_tag(self, tag))
    }

    fn stats(&self) -> Result<SearchStats, SearchError> {
        Ok(SearchEngine::stats(self))
    }

    fn clear(&mut self) -> Result<(), SearchError> {
        SearchEngine::clear(self);
        Ok(())
    }
}
