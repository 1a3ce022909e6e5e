// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Hash Search
//!
//! Ad-hoc, paginated, sortable search over JSON documents stored as the
//! values of a Redis hash.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SearchEngine                          │
//! │  • Parses the request form, fails fast on malformed input   │
//! │  • Admits into a bounded worker pool (or refuses at once)   │
//! │  • Resumes the caller exactly once via a one-shot handle    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DocumentStore                          │
//! │  • HVALS <key> under a short exclusive connection lock      │
//! │  • Redis, or in-memory for tests and embedding              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                    (raw documents, owned)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Scan / Sort / Page                         │
//! │  • Exact-match filters (AND), free text (OR, no case)       │
//! │  • Stable sort by one string field, either direction        │
//! │  • Half-open page window, total always reported             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hash_search::{SearchEngine, SearchEngineConfig, SearchReply};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SearchEngineConfig {
//!         redis_url: Some("redis://localhost:6379".into()),
//!         ..Default::default()
//!     };
//!     let engine = SearchEngine::connect(config).await.expect("Failed to connect");
//!
//!     // Everyone in department Y whose text fields mention "bo", by name, first 10
//!     let reply = engine
//!         .search(&["employees", "bo", "+name", "0", "10", "department", "Y"])
//!         .await
//!         .expect("Search failed");
//!
//!     match reply {
//!         SearchReply::Empty => println!("No matches"),
//!         SearchReply::Page { total, documents } => {
//!             println!("{} matches, showing {}", total, documents.len());
//!         }
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`coordinator`]: the [`SearchEngine`] and its worker pool
//! - [`search`]: request parsing, predicate, accumulation, sort and paging
//! - [`storage`]: document store gateways (Redis, memory)
//! - [`intern`]: concurrent string interning
//! - [`metrics`]: `metrics` crate instrumentation

pub mod config;
pub mod coordinator;
pub mod intern;
pub mod metrics;
pub mod search;
pub mod storage;

pub use config::SearchEngineConfig;
pub use coordinator::{EngineStats, PendingSearch, SearchEngine, SearchStage};
pub use intern::StringPool;
pub use search::{
    DocumentError, MalformedDocumentPolicy, PageWindow, SearchError, SearchQuery, SearchReply,
    SortDirection,
};
pub use storage::traits::{DocumentStore, StoreError};
