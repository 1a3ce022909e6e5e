// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of the document store call.
///
/// The two variants mirror the two ways the list-values call can go wrong:
/// the store never answered, or it answered with an error of its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No reply from the store (connection refused, dropped, timed out).
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store replied with an error; the message is kept verbatim.
    #[error("{0}")]
    Reply(String),
}

/// Read access to a collection of raw documents kept under one key.
///
/// Implementations hold whatever exclusive section they need around the
/// round-trip to the backend and release it before returning. Callers do
/// all parsing and filtering outside of it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every value stored under `key`, in store iteration order.
    /// A missing key is an empty collection, not an error.
    async fn list_values(&self, key: &str) -> Result<Vec<Vec<u8>>, StoreError>;
}
