// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Result accumulation.
//!
//! A [`Candidate`] is a document that passed the predicate. It owns its raw
//! serialized form until the reply either emits it or drops it, and a copy
//! of its sort key so the parsed JSON tree can be released as soon as the
//! scan step that produced it ends.

use serde_json::Value;

use super::error::DocumentError;

#[derive(Debug, PartialEq, Eq)]
pub struct Candidate {
    sort_key: String,
    raw: Vec<u8>,
}

impl Candidate {
    /// Promote a parsed document, extracting `sort_field` as its sort key.
    ///
    /// Consumes the parsed tree; only the key survives.
    pub fn promote(document: Value, sort_field: &str, raw: Vec<u8>) -> Result<Self, DocumentError> {
        let sort_key = match document {
            Value::Object(mut map) => match map.remove(sort_field) {
                Some(Value::String(s)) => s,
                Some(_) => return Err(DocumentError::NotAString(sort_field.to_string())),
                None => return Err(DocumentError::MissingField(sort_field.to_string())),
            },
            _ => return Err(DocumentError::MissingField(sort_field.to_string())),
        };
        Ok(Self { sort_key, raw })
    }

    #[inline]
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Release the candidate, keeping only the bytes to emit.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }
}

/// Candidates that passed the predicate, in store iteration order until sorted.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub(super) candidates: Vec<Candidate>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            candidates: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}
