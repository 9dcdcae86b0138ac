//! Session persistence for the search state.
//!
//! The snapshot is stored as JSON under one key. Reads never fail:
//!
//! | Stored value        | Result                    |
//! |---------------------|---------------------------|
//! | absent              | default                   |
//! | not JSON            | default, error logged     |
//! | JSON, wrong shape   | default, warning logged   |
//!
//! Writes that fail are logged and dropped.

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::{StateError, StorageError};
use crate::types::SearchState;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Session-scoped key/value store (the shape of the browser's `sessionStorage`).
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory session storage with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push keys + values past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock();
        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

/// Reads and writes the [`SearchState`] snapshot.
#[derive(Clone)]
pub struct PostSearchState {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl PostSearchState {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn try_set_search_state(&self, state: &SearchState) -> Result<(), StateError> {
        let json = serde_json::to_string(state)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Persist the snapshot. Failures are logged and the write is dropped.
    pub fn set_search_state(&self, search_term: &str, active_tag: &str, view_all: bool) {
        let state = SearchState::new(search_term, active_tag, view_all);
        if let Err(e) = self.try_set_search_state(&state) {
            log::error!("Failed to save search state: {}", e);
        }
    }

    /// The stored snapshot, `None` when nothing is stored.
    pub fn try_get_search_state(&self) -> Result<Option<SearchState>, StateError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&raw)?;
        if !is_valid_search_state(&value) {
            return Err(StateError::InvalidShape);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|_| StateError::InvalidShape)
    }

    /// The stored snapshot, or the zero state when absent or unreadable.
    pub fn get_search_state(&self) -> SearchState {
        match self.try_get_search_state() {
            Ok(state) => state.unwrap_or_default(),
            Err(StateError::InvalidShape) => {
                log::warn!("Invalid search state format in session storage");
                SearchState::default()
            }
            Err(e) => {
                log::error!("Failed to retrieve search state: {}", e);
                SearchState::default()
            }
        }
    }

    pub fn clear_search_state(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            log::error!("Failed to clear search state: {}", e);
        }
    }
}

/// `{searchTerm: string, activeTag: string, viewAll: bool}`; extra keys are fine.
fn is_valid_search_state(value: &Value) -> bool {
    let Some(record) = value.as_object() else {
        return false;
    };
    record.get("searchTerm").is_some_and(Value::is_string)
        && record.get("activeTag").is_some_and(Value::is_string)
        && record.get("viewAll").is_some_and(Value::is_boolean)
}
