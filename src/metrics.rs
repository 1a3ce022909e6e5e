// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for hash-search.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The embedding process is responsible for choosing the exporter.
//!
//! # Metric Naming Convention
//! - `hash_search_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `stage`: fetch, scan, sort, total
//! - `status`: success, or an error kind (`store_reply`, `pool_exhausted`, ...)

use metrics::{counter, gauge, histogram};
use std::time::{Duration, Instant};

/// Record a finished request (success or error kind)
pub fn record_search(status: &str) {
    counter!(
        "hash_search_requests_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a request refused at dispatch
pub fn record_rejection(reason: &str) {
    counter!(
        "hash_search_rejections_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record time spent in one pipeline stage
pub fn record_stage_latency(stage: &str, duration: Duration) {
    histogram!(
        "hash_search_stage_seconds",
        "stage" => stage.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record documents returned by the store for one request
pub fn record_documents_scanned(count: usize) {
    histogram!("hash_search_documents_scanned").record(count as f64);
}

/// Record the match count of one request
pub fn record_matches(count: usize) {
    histogram!("hash_search_matches").record(count as f64);
}

/// Record a document that could not be evaluated
pub fn record_malformed_document(reason: &str) {
    counter!(
        "hash_search_malformed_documents_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Set the number of admitted, unfinished requests
pub fn set_in_flight(count: usize) {
    gauge!("hash_search_in_flight").set(count as f64);
}

/// A timing guard that records stage latency on drop
pub struct LatencyTimer {
    stage: &'static str,
    start: Instant,
}

impl LatencyTimer {
    /// Start a new latency timer
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_stage_latency(self.stage, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These only check the calls don't panic without a recorder installed.

    #[test]
    fn test_counters() {
        record_search("success");
        record_search("store_reply");
        record_rejection("pool_exhausted");
        record_malformed_document("parse");
    }

    #[test]
    fn test_histograms_and_gauges() {
        record_stage_latency("fetch", Duration::from_micros(100));
        record_documents_scanned(42);
        record_matches(0);
        set_in_flight(3);
    }

    #[test]
    fn test_latency_timer() {
        {
            let _timer = LatencyTimer::new("scan");
            std::thread::sleep(Duration::from_micros(10));
        }
        for stage in ["fetch", "sort", "total"] {
            let _timer = LatencyTimer::new(stage);
        }
    }
}
