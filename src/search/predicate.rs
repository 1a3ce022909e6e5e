// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Document match predicate.
//!
//! Filters are an exact, case-sensitive AND-gate. The free-text query is a
//! case-insensitive substring OR-scan over a small fixed list of fields,
//! short-circuiting on the first hit. Empty query text matches everything
//! that passed the filters.

use serde_json::Value;

use super::error::DocumentError;
use super::query::SearchQuery;

pub struct MatchPredicate<'a> {
    query: &'a SearchQuery,
    text_fields: &'a [String],
}

impl<'a> MatchPredicate<'a> {
    pub fn new(query: &'a SearchQuery, text_fields: &'a [String]) -> Self {
        Self { query, text_fields }
    }

    /// Evaluate one parsed document.
    ///
    /// A filter field or scanned text field that is absent or not a string
    /// makes the document unevaluable; the caller decides what that means.
    pub fn matches(&self, document: &Value) -> Result<bool, DocumentError> {
        for filter in &self.query.filters {
            if string_field(document, &filter.field)? != filter.expected {
                return Ok(false);
            }
        }

        let needle = self.query.needle();
        if needle.is_empty() {
            return Ok(true);
        }

        for field in self.text_fields {
            if string_field(document, field)?.to_lowercase().contains(needle) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn string_field<'v>(document: &'v Value, field: &str) -> Result<&'v str, DocumentError> {
    match document.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DocumentError::NotAString(field.to_string())),
        None => Err(DocumentError::MissingField(field.to_string())),
    }
}
