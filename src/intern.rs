// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Concurrent string interning.
//!
//! Equal strings share one `Arc<str>` allocation. Lookups of strings that
//! are already interned only take a shard read lock.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hash_search::StringPool;
//!
//! let pool = StringPool::with_capacity(16);
//! let a = pool.intern("department");
//! let b = pool.intern(&String::from("department"));
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(pool.len(), 1);
//! ```

use dashmap::DashMap;
use std::sync::Arc;

pub struct StringPool {
    strings: DashMap<Arc<str>, ()>,
}

impl StringPool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: DashMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: DashMap::with_capacity(capacity),
        }
    }

    /// Return the shared copy of `s`, adding it on first sight.
    pub fn intern(&self, s: &str) -> Arc<str> {
        if let Some(existing) = self.strings.get(s) {
            return Arc::clone(existing.key());
        }
        // Another thread may win the race; `entry` keeps whichever landed first.
        let entry = self.strings.entry(Arc::from(s)).or_insert(());
        Arc::clone(entry.key())
    }

    #[must_use]
    pub fn contains(&self, s: &str) -> bool {
        self.strings.contains_key(s)
    }

    /// Number of distinct strings held
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_string_same_allocation() {
        let pool = StringPool::new();
        let a = pool.intern("name");
        let b = pool.intern("name");
        let c = pool.intern("pin");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_contains() {
        let pool = StringPool::default();
        assert!(pool.is_empty());
        assert!(!pool.contains("name"));
        pool.intern("name");
        assert!(pool.contains("name"));
    }

    #[test]
    fn test_empty_string() {
        let pool = StringPool::new();
        assert_eq!(&*pool.intern(""), "");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_concurrent_interning_converges() {
        let pool = Arc::new(StringPool::with_capacity(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    (0..100).map(|i| pool.intern(&format!("s{}", i % 10))).collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<Arc<str>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(pool.len(), 10);
        for run in &results[1..] {
            for (a, b) in results[0].iter().zip(run) {
                assert!(Arc::ptr_eq(a, b));
            }
        }
    }
}
