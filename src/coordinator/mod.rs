// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search coordinator.
//!
//! The [`SearchEngine`] takes search requests off the caller's task, runs
//! them on a bounded worker pool and resumes the caller exactly once with
//! the reply or an error.
//!
//! # Request lifecycle
//!
//! ```text
//! dispatch(args)
//!   │ parse (malformed → error, nothing scheduled)
//!   │ admit (pool full → PoolExhausted, nothing scheduled)
//!   ▼
//! worker task ─ acquire worker ─ list_values ─ spawn_blocking(scan, sort, page)
//!   │
//!   └─ release pool slot ─ send on one-shot ─▶ PendingSearch resolves
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hash_search::{SearchEngine, SearchEngineConfig, SearchReply};
//! use hash_search::storage::memory::InMemoryDocumentStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = InMemoryDocumentStore::new();
//! store.hset("employees", "e1", r#"{"name":"Ann","department":"X","pin":"1","number":"10"}"#);
//! store.hset("employees", "e2", r#"{"name":"Bob","department":"Y","pin":"2","number":"20"}"#);
//!
//! let engine = SearchEngine::new(SearchEngineConfig::default(), Arc::new(store));
//! let reply = engine.search(&["employees", "an", "-name", "0", "10"]).await.unwrap();
//! assert_eq!(reply.total(), 1);
//! # }
//! ```

mod pending;
mod pool;
mod types;

pub use pending::PendingSearch;
pub use pool::WorkerPool;
pub use types::{EngineStats, SearchStage};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, error, info, warn, Instrument};

use crate::config::SearchEngineConfig;
use crate::metrics::{self, LatencyTimer};
use crate::search::{scan_documents, ScanOptions, SearchError, SearchQuery, SearchReply};
use crate::storage::redis::RedisDocumentStore;
use crate::storage::traits::{DocumentStore, StoreError};

#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
    invalid: AtomicU64,
}

/// Search engine front door.
///
/// `Send + Sync`; share it behind an `Arc`. `dispatch` and `search` must be
/// called from inside a Tokio runtime.
pub struct SearchEngine {
    /// Runtime-adjustable settings (pool sizes are fixed at construction)
    config: RwLock<SearchEngineConfig>,
    store: Arc<dyn DocumentStore>,
    pool: WorkerPool,
    next_request_id: AtomicU64,
    counters: Arc<Counters>,
}

impl SearchEngine {
    pub fn new(config: SearchEngineConfig, store: Arc<dyn DocumentStore>) -> Self {
        let pool = WorkerPool::new(config.worker_pool_size, config.max_pending);
        info!(
            workers = pool.workers(),
            capacity = pool.capacity(),
            "Search engine created"
        );
        Self {
            config: RwLock::new(config),
            store,
            pool,
            next_request_id: AtomicU64::new(1),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Build an engine on top of Redis using `redis_url` from the config.
    pub async fn connect(config: SearchEngineConfig) -> Result<Self, StoreError> {
        let store = RedisDocumentStore::from_config(&config).await?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Snapshot of the current configuration
    #[must_use]
    pub fn config(&self) -> SearchEngineConfig {
        self.config.read().clone()
    }

    /// Swap parse limits, text fields and the malformed-document policy.
    ///
    /// Requests already dispatched keep the settings they were parsed with.
    /// Pool sizes cannot change after construction; differing values are
    /// ignored.
    pub fn reload_config(&self, new_config: SearchEngineConfig) {
        let mut config = self.config.write();
        if new_config.worker_pool_size != config.worker_pool_size
            || new_config.max_pending != config.max_pending
        {
            warn!(
                workers = config.worker_pool_size,
                max_pending = config.max_pending,
                "Worker pool is sized at startup; ignoring new pool settings"
            );
        }
        *config = SearchEngineConfig {
            worker_pool_size: config.worker_pool_size,
            max_pending: config.max_pending,
            ..new_config
        };
        info!("Search configuration reloaded");
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            in_flight: self.pool.in_flight(),
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            invalid: self.counters.invalid.load(Ordering::Relaxed),
        }
    }

    /// Run a search and wait for its reply.
    pub async fn search<S: AsRef<str>>(&self, args: &[S]) -> Result<SearchReply, SearchError> {
        self.dispatch(args)?.await
    }

    /// Validate `args`, hand the request to the worker pool and return at once.
    ///
    /// Malformed requests and a saturated pool fail here, synchronously, and
    /// nothing is scheduled. Otherwise the returned [`PendingSearch`]
    /// resolves exactly once.
    #[tracing::instrument(skip(self, args), fields(argc = args.len()))]
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<PendingSearch, SearchError> {
        let (query, options) = {
            let config = self.config.read();
            match SearchQuery::parse(args, &config.query_limits()) {
                Ok(query) => (query, config.scan_options()),
                Err(e) => {
                    self.counters.invalid.fetch_add(1, Ordering::Relaxed);
                    metrics::record_search(e.kind());
                    debug!(stage = %SearchStage::Received, error = %e, "Rejected malformed search");
                    return Err(e);
                }
            }
        };

        let admission = match self.pool.try_admit() {
            Ok(admission) => admission,
            Err(e) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                metrics::record_rejection(e.kind());
                metrics::record_search(e.kind());
                warn!(
                    key = %query.collection_key,
                    in_flight = self.pool.in_flight(),
                    "Search refused: worker pool saturated"
                );
                return Err(e);
            }
        };

        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, pending) = PendingSearch::channel(request_id);
        let store = Arc::clone(&self.store);
        let pool = self.pool.clone();
        let counters = Arc::clone(&self.counters);
        metrics::set_in_flight(pool.in_flight());
        debug!(request_id, stage = %SearchStage::Dispatched, key = %query.collection_key, "Search dispatched");

        let span = tracing::debug_span!("search", request_id, key = %query.collection_key);
        tokio::spawn(
            async move {
                // A panicking worker still reaches the bookkeeping below.
                let worker = tokio::spawn(
                    run_search(store, pool.clone(), query, options).in_current_span(),
                );
                let result = match worker.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!(error = %e, "Search worker did not complete");
                        Err(SearchError::WorkerLost)
                    }
                };

                match &result {
                    Ok(reply) => {
                        counters.completed.fetch_add(1, Ordering::Relaxed);
                        metrics::record_search("success");
                        debug!(stage = %SearchStage::Done, total = reply.total(), "Search complete");
                    }
                    Err(e) => {
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                        metrics::record_search(e.kind());
                        warn!(stage = %SearchStage::Failed, error = %e, "Search failed");
                    }
                }

                // Free the slot first so a caller that immediately searches
                // again sees it.
                drop(admission);
                metrics::set_in_flight(pool.in_flight());

                if reply_tx.send(result).is_err() {
                    debug!("Caller dropped its handle before the reply");
                }
            }
            .instrument(span),
        );

        Ok(pending)
    }
}

/// Worker body: Fetching → Scanning → Sorting → Replying.
async fn run_search(
    store: Arc<dyn DocumentStore>,
    pool: WorkerPool,
    query: SearchQuery,
    options: ScanOptions,
) -> Result<SearchReply, SearchError> {
    let _total = LatencyTimer::new("total");
    let _worker = pool.acquire_worker().await?;

    debug!(stage = %SearchStage::Fetching, "Listing collection");
    let values = {
        let _fetch = LatencyTimer::new("fetch");
        store.list_values(&query.collection_key).await?
    };
    metrics::record_documents_scanned(values.len());

    debug!(stage = %SearchStage::Scanning, documents = values.len(), "Scanning documents");
    let job = tokio::task::spawn_blocking(move || -> Result<SearchReply, SearchError> {
        let outcome = {
            let _scan = LatencyTimer::new("scan");
            scan_documents(values, &query, &options)?
        };
        metrics::record_matches(outcome.results.len());

        debug!(stage = %SearchStage::Sorting, matched = outcome.results.len(), "Sorting matches");
        let _sort = LatencyTimer::new("sort");
        Ok(outcome.results.into_reply(query.sort.direction, query.window))
    });

    let reply = job.await.map_err(|e| {
        error!(error = %e, "Scan task did not complete");
        SearchError::WorkerLost
    })??;

    debug!(stage = %SearchStage::Replying, total = reply.total(), page = reply.documents().len(), "Reply ready");
    Ok(reply)
}
