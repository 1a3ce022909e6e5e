// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! The synchronous half of a search: scan, filter, sort, page.
//!
//! ```text
//! raw values ──parse──▶ Value ──predicate──▶ match? ──yes──▶ Candidate ─▶ ResultSet
//!                                               │
//!                                               └─no──▶ dropped
//! ResultSet ──sort (if needed)──▶ window ──▶ SearchReply
//! ```
//!
//! Runs on a blocking worker thread; it never touches the store connection.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::accumulator::{Candidate, ResultSet};
use super::error::{DocumentError, SearchError};
use super::page::SearchReply;
use super::predicate::MatchPredicate;
use super::query::SearchQuery;
use crate::metrics;

/// Handling of documents that cannot be parsed or lack a needed string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedDocumentPolicy {
    /// Treat as a non-match and keep scanning
    #[default]
    Skip,
    /// Fail the whole request
    Fail,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub text_fields: Vec<String>,
    pub malformed_documents: MalformedDocumentPolicy,
    pub capacity_hint: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        crate::config::SearchEngineConfig::default().scan_options()
    }
}

/// What a scan produced
#[derive(Debug)]
pub struct ScanOutcome {
    pub results: ResultSet,
    /// Documents returned by the store
    pub scanned: usize,
    /// Documents skipped as malformed
    pub skipped: usize,
}

/// Evaluate every raw document, keeping the ones that match.
///
/// Each raw value is consumed: either moved into a [`Candidate`] or dropped
/// before the next one is parsed.
pub fn scan_documents(
    values: Vec<Vec<u8>>,
    query: &SearchQuery,
    options: &ScanOptions,
) -> Result<ScanOutcome, SearchError> {
    let scanned = values.len();
    let predicate = MatchPredicate::new(query, &options.text_fields);
    let mut results = ResultSet::with_capacity(options.capacity_hint.min(scanned));
    let mut skipped = 0;

    for (index, raw) in values.into_iter().enumerate() {
        match evaluate(&predicate, &query.sort.field, raw) {
            Ok(Some(candidate)) => results.push(candidate),
            Ok(None) => {}
            Err(source) => {
                metrics::record_malformed_document(source.kind());
                match options.malformed_documents {
                    MalformedDocumentPolicy::Skip => {
                        warn!(key = %query.collection_key, index, error = %source, "Skipping malformed document");
                        skipped += 1;
                    }
                    MalformedDocumentPolicy::Fail => {
                        return Err(SearchError::MalformedDocument { index, source });
                    }
                }
            }
        }
    }

    debug!(
        key = %query.collection_key,
        scanned,
        matched = results.len(),
        skipped,
        "Scan complete"
    );
    Ok(ScanOutcome { results, scanned, skipped })
}

fn evaluate(
    predicate: &MatchPredicate<'_>,
    sort_field: &str,
    raw: Vec<u8>,
) -> Result<Option<Candidate>, DocumentError> {
    let document: Value = serde_json::from_slice(&raw)?;
    if !predicate.matches(&document)? {
        return Ok(None);
    }
    Candidate::promote(document, sort_field, raw).map(Some)
}

/// Scan, then sort and slice. The whole synchronous pipeline for one request.
pub fn execute_search(
    values: Vec<Vec<u8>>,
    query: &SearchQuery,
    options: &ScanOptions,
) -> Result<SearchReply, SearchError> {
    let outcome = scan_documents(values, query, options)?;
    Ok(outcome.results.into_reply(query.sort.direction, query.window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::QueryLimits;

    fn q(args: &[&str]) -> SearchQuery {
        SearchQuery::parse(args, &QueryLimits::default()).unwrap()
    }

    fn docs(raw: &[&str]) -> Vec<Vec<u8>> {
        raw.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    const ANN: &str = r#"{"name":"Ann","department":"X","pin":"1","number":"10"}"#;
    const BOB: &str = r#"{"name":"Bob","department":"Y","pin":"2","number":"20"}"#;

    #[test]
    fn test_scan_counts() {
        let outcome = scan_documents(
            docs(&[ANN, BOB, "not json"]),
            &q(&["people", "", "name", "0", "10"]),
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome.scanned, 3);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_fail_policy_aborts() {
        let options = ScanOptions {
            malformed_documents: MalformedDocumentPolicy::Fail,
            ..Default::default()
        };
        let err = scan_documents(docs(&[ANN, "{", BOB]), &q(&["people", "", "name", "0", "10"]), &options)
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::MalformedDocument { index: 1, source: DocumentError::Parse(_) }
        ));
    }

    #[test]
    fn test_missing_sort_key_is_malformed() {
        let outcome = scan_documents(
            docs(&[ANN, r#"{"name":"Cy","department":"X","pin":"3","number":"30","title":"t"}"#]),
            &q(&["people", "", "-title", "0", "10"]),
            &ScanOptions::default(),
        )
        .unwrap();
        // Ann has no "title" to sort by
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_rejected_documents_are_not_counted_as_skipped() {
        let outcome = scan_documents(
            docs(&[ANN, BOB]),
            &q(&["people", "bob", "name", "0", "10"]),
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_execute_search_text_query() {
        let reply = execute_search(
            docs(&[ANN, BOB]),
            &q(&["people", "an", "-name", "0", "10"]),
            &ScanOptions::default(),
        )
        .unwrap();
        assert_eq!(reply, SearchReply::Page { total: 1, documents: docs(&[ANN]) });
    }

    #[test]
    fn test_execute_search_no_documents() {
        let reply = execute_search(vec![], &q(&["people", "", "name", "0", "10"]), &ScanOptions::default())
            .unwrap();
        assert_eq!(reply, SearchReply::Empty);
    }
}
