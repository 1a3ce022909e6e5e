// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Document store gateways.
//!
//! - [`redis::RedisDocumentStore`]: `HVALS` against a Redis hash
//! - [`memory::InMemoryDocumentStore`]: hash-of-hashes kept in a `DashMap`

pub mod memory;
pub mod redis;
pub mod traits;

pub use traits::{DocumentStore, StoreError};
