// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the search engine.
//!
//! # Example
//!
//! ```
//! use hash_search::SearchEngineConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SearchEngineConfig::default();
//! assert_eq!(config.worker_pool_size, 6);
//! assert_eq!(config.max_filter_pairs, Some(5));
//!
//! // Full config
//! let config = SearchEngineConfig {
//!     redis_url: Some("redis://localhost:6379".into()),
//!     worker_pool_size: 12,
//!     max_pending: 256,
//!     max_filter_pairs: None, // no cap
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

use crate::search::{MalformedDocumentPolicy, QueryLimits, ScanOptions};

/// Configuration for the search engine.
///
/// Everything has a default; `redis_url` is only needed when the engine is
/// built on top of [`RedisDocumentStore`](crate::storage::redis::RedisDocumentStore).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEngineConfig {
    /// Redis connection string (e.g., "redis://localhost:6379")
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Prefix prepended to every collection key
    #[serde(default)]
    pub redis_prefix: Option<String>,

    /// Searches executing concurrently (fixed at engine construction)
    #[serde(default = "default_worker_pool_size")]
    pub worker_pool_size: usize,

    /// Searches admitted but waiting for a worker. When the pool and this
    /// queue are both full, dispatch fails immediately.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Upper bound on filter pairs per request (None = unlimited)
    #[serde(default = "default_max_filter_pairs")]
    pub max_filter_pairs: Option<usize>,

    /// Fields scanned, in order, by the free-text query
    #[serde(default = "default_text_fields")]
    pub text_fields: Vec<String>,

    /// What to do with a document that cannot be evaluated
    #[serde(default)]
    pub malformed_documents: MalformedDocumentPolicy,

    /// Initial capacity of each request's result set
    #[serde(default = "default_result_capacity_hint")]
    pub result_capacity_hint: usize,
}

fn default_worker_pool_size() -> usize { 6 }
fn default_max_pending() -> usize { 64 }
fn default_max_filter_pairs() -> Option<usize> { Some(5) }
fn default_result_capacity_hint() -> usize { 200 }
fn default_text_fields() -> Vec<String> {
    ["name", "department", "pin", "number"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            redis_prefix: None,
            worker_pool_size: default_worker_pool_size(),
            max_pending: default_max_pending(),
            max_filter_pairs: default_max_filter_pairs(),
            text_fields: default_text_fields(),
            malformed_documents: MalformedDocumentPolicy::default(),
            result_capacity_hint: default_result_capacity_hint(),
        }
    }
}

impl SearchEngineConfig {
    /// Limits applied by the request parser
    #[must_use]
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            max_filter_pairs: self.max_filter_pairs,
        }
    }

    /// Options applied by the document scan
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            text_fields: self.text_fields.clone(),
            malformed_documents: self.malformed_documents,
            capacity_hint: self.result_capacity_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchEngineConfig::default();
        assert_eq!(config.worker_pool_size, 6);
        assert_eq!(config.max_pending, 64);
        assert_eq!(config.text_fields, vec!["name", "department", "pin", "number"]);
        assert_eq!(config.malformed_documents, MalformedDocumentPolicy::Skip);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchEngineConfig = serde_json::from_str(
            r#"{"worker_pool_size": 2, "max_filter_pairs": null, "malformed_documents": "fail"}"#,
        )
        .unwrap();

        assert_eq!(config.worker_pool_size, 2);
        assert_eq!(config.max_filter_pairs, None);
        assert_eq!(config.malformed_documents, MalformedDocumentPolicy::Fail);
        assert_eq!(config.max_pending, 64);
        assert_eq!(config.text_fields.len(), 4);
    }

    #[test]
    fn test_projections() {
        let config = SearchEngineConfig {
            max_filter_pairs: Some(2),
            text_fields: vec!["title".into()],
            ..Default::default()
        };
        assert_eq!(config.query_limits().max_filter_pairs, Some(2));
        let scan = config.scan_options();
        assert_eq!(scan.text_fields, vec!["title".to_string()]);
        assert_eq!(scan.capacity_hint, 200);
    }
}
