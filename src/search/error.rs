// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use thiserror::Error;

use crate::storage::traits::StoreError;

/// Why a single document could not be evaluated.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("field '{0}' is missing")]
    MissingField(String),
    #[error("field '{0}' is not a string")]
    NotAString(String),
}

/// Terminal failure of one search request.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("wrong number of arguments ({got} tokens)")]
    WrongArity { got: usize },

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("cannot schedule search: worker pool saturated")]
    PoolExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("document #{index} is malformed: {source}")]
    MalformedDocument {
        index: usize,
        #[source]
        source: DocumentError,
    },

    #[error("search worker exited without replying")]
    WorkerLost,
}

impl SearchError {
    /// True for errors raised before the request reached the worker pool.
    #[must_use]
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::WrongArity { .. } | Self::Malformed(_))
    }

    /// Short label used for metrics and logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WrongArity { .. } => "wrong_arity",
            Self::Malformed(_) => "malformed",
            Self::PoolExhausted => "pool_exhausted",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
            Self::Store(StoreError::Reply(_)) => "store_reply",
            Self::MalformedDocument { .. } => "malformed_document",
            Self::WorkerLost => "worker_lost",
        }
    }
}

impl DocumentError {
    /// Short label used for metrics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::MissingField(_) => "missing_field",
            Self::NotAString(_) => "not_a_string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err = SearchError::from(StoreError::Reply("WRONGTYPE bad key".into()));
        assert_eq!(err.to_string(), "WRONGTYPE bad key");
        assert_eq!(err.kind(), "store_reply");
    }

    #[test]
    fn test_request_errors() {
        assert!(SearchError::WrongArity { got: 2 }.is_request_error());
        assert!(SearchError::Malformed("x".into()).is_request_error());
        assert!(!SearchError::PoolExhausted.is_request_error());
        assert!(!SearchError::WorkerLost.is_request_error());
    }

    #[test]
    fn test_malformed_document_display() {
        let err = SearchError::MalformedDocument {
            index: 3,
            source: DocumentError::MissingField("pin".into()),
        };
        assert_eq!(err.to_string(), "document #3 is malformed: field 'pin' is missing");
    }
}
