//! Error types for the search stack.
//!
//! None of these reach the end user. The façade, the state store and the UI
//! controller absorb them at their boundary and hand back empty or default
//! values; the `try_*` entry points keep the typed failure for callers (and
//! tests) that care which boundary tripped.

use thiserror::Error;

/// Failures of the index or the resource that provides it.
///
/// `Clone` because one initialization outcome is shared by every caller that
/// awaited the same in-flight build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Queried before `init` completed.
    #[error("search engine not initialized")]
    NotInitialized,

    /// The underlying engine resource failed to load.
    #[error("failed to load search engine: {0}")]
    LoadFailed(String),

    /// The engine failed while answering a call.
    #[error("search backend failure: {0}")]
    Backend(String),

    /// A post could not be decoded or indexed.
    #[error("invalid post data: {0}")]
    InvalidPost(String),
}

/// Session storage access failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or access was denied.
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the storage quota.
    #[error("session storage quota exceeded: need {needed} bytes, limit {limit}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Configured capacity
        limit: usize,
    },
}

/// Reading the persisted search state failed.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Stored value is not JSON.
    #[error("malformed search state: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Stored value is JSON but not a `{searchTerm, activeTag, viewAll}` object.
    #[error("invalid search state format")]
    InvalidShape,
}
