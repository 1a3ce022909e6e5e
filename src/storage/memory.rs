// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use dashmap::DashMap;
use super::traits::{DocumentStore, StoreError};

/// Hash-of-hashes held in memory: `key → [(field, raw document)]`.
///
/// Field order follows insertion order so `list_values` behaves like a
/// deterministic `HVALS`.
pub struct InMemoryDocumentStore {
    data: DashMap<String, Vec<(String, Vec<u8>)>>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Set `field` of hash `key`, replacing any previous value in place.
    pub fn hset(&self, key: &str, field: &str, value: impl Into<Vec<u8>>) {
        let value = value.into();
        let mut hash = self.data.entry(key.to_string()).or_default();
        let position = hash.iter().position(|(f, _)| f == field);
        match position {
            Some(i) => hash[i].1 = value,
            None => hash.push((field.to_string(), value)),
        }
    }

    /// Remove `field` from hash `key`. Returns whether it existed.
    pub fn hdel(&self, key: &str, field: &str) -> bool {
        let Some(mut hash) = self.data.get_mut(key) else {
            return false;
        };
        let before = hash.len();
        hash.retain(|(f, _)| f != field);
        let removed = hash.len() != before;
        let now_empty = hash.is_empty();
        drop(hash);
        if now_empty {
            self.data.remove(key);
        }
        removed
    }

    /// Number of fields in hash `key`
    #[must_use]
    pub fn len(&self, key: &str) -> usize {
        self.data.get(key).map(|h| h.len()).unwrap_or(0)
    }

    /// Check if the store holds no hashes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear all hashes
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_values(&self, key: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        Ok(self
            .data
            .get(key)
            .map(|hash| hash.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default())
    }
}
