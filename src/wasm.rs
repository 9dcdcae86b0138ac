//! WebAssembly bindings for the post search engine.
//!
//! Posts go in as JSON strings (one per call, so a bad record is reported
//! on its own); results come out as plain JS values through
//! `serde-wasm-bindgen`. Field names stay snake_case to match the result
//! shape the page scripts already read.

use crate::search::SearchEngine;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// WASM-accessible search engine.
#[wasm_bindgen]
pub struct WasmSearchEngine {
    engine: SearchEngine,
}

impl Default for WasmSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmSearchEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSearchEngine {
        WasmSearchEngine {
            engine: SearchEngine::new(),
        }
    }

    /// Index one post given as JSON. Throws on malformed JSON.
    pub fn add_post(&mut self, json: &str) -> Result<(), JsValue> {
        self.engine
            .add_post_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Ranked search. Returns an array of results.
    pub fn search(&self, query: &str, max_results: usize) -> Result<JsValue, JsValue> {
        let results = self.engine.search(query, max_results);
        to_value(&results).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Exact tag lookup. Returns an array of results with score 1.
    pub fn search_by_tag(&self, tag: &str) -> Result<JsValue, JsValue> {
        let results = self.engine.search_by_tag(tag);
        to_value(&results).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `{ total_posts, indexed_words, indexed_keywords }`
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        to_value(&self.engine.stats()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }
}
