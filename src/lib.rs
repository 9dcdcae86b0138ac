//! Client-side post search: an in-memory full-text and tag index, the façade
//! that owns it, and the UI controller that builds it lazily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  inverted   │────▶│   search     │────▶│   facade     │
//! │ (tokens,    │     │ (SearchEngine│     │ (PostSearch, │
//! │  keywords)  │     │  + snippets) │     │  lifecycle)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   scoring   │     │   backend    │     │      ui      │
//! │ (weights,   │     │ (engine seam)│     │ (lazy init,  │
//! │  ranking)   │     │              │     │  debounce,   │
//! └─────────────┘     └──────────────┘     │  fallback)   │
//!                                          └──────────────┘
//! ```
//!
//! # Scoring
//!
//! | Match                          | Weight |
//! |--------------------------------|--------|
//! | title token                    | 3      |
//! | keyword containing the term    | 2      |
//! | description token              | 1      |
//!
//! A term hits any token it is a substring of. Results are ordered by
//! score, then by insertion order.
//!
//! # Usage
//!
//! ```
//! use postsearch::{PostRecord, PostSearch};
//!
//! # tokio_test_block(async {
//! let search = PostSearch::default();
//! search
//!     .init(vec![PostRecord::new("p1", "JavaScript Testing").with_keywords(["javascript"])])
//!     .await
//!     .unwrap();
//!
//! let results = search.search("javascript", 10);
//! assert_eq!(results[0].id, "p1");
//! assert!(results[0].title_match);
//! # });
//! # fn tokio_test_block<F: std::future::Future<Output = ()>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod facade;
pub mod inverted;
pub mod scoring;
pub mod search;
pub mod state;
pub mod types;
pub mod ui;
pub mod utils;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use backend::SearchBackend;
pub use config::SearchConfig;
pub use error::{SearchError, StateError, StorageError};
pub use facade::PostSearch;
pub use inverted::PostIndex;
pub use search::SearchEngine;
pub use state::{MemoryStorage, PostSearchState, SessionStorage};
pub use types::{PostRecord, SearchResult, SearchState, SearchStats};
pub use ui::{InitPhase, PostSearchUi, UiEvent};
pub use utils::normalize;

#[cfg(feature = "wasm")]
pub use wasm::WasmSearchEngine;
