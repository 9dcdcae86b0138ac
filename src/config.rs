//! Runtime knobs for the search façade and UI controller.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes: `{"debounce_ms": 150}` is a complete config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session storage key the search state lives under.
pub const DEFAULT_STORAGE_KEY: &str = "post-search-state";

/// Quiet period before a keystroke turns into a search.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Result cap used by the UI's combined search.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Result cap for direct façade searches.
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum results for UI-driven combined searches (default: 100)
    pub max_results: usize,
    /// Maximum results for plain `search` calls (default: 50)
    pub default_limit: usize,
    /// Debounce window in milliseconds (default: 300)
    pub debounce_ms: u64,
    /// Session storage key (default: "post-search-state")
    pub storage_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            default_limit: DEFAULT_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse a (possibly partial) JSON config over the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
