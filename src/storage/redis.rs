// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Redis document store.
//!
//! Every collection is one Redis hash whose values are serialized JSON
//! documents:
//!
//! ```text
//! HSET employees e1 '{"name":"Ann","department":"X","pin":"1","number":"100"}'
//! HSET employees e2 '{"name":"Bob","department":"Y","pin":"2","number":"200"}'
//! HVALS employees
//! ```
//!
//! The connection is shared by all search workers. Each `HVALS` round-trip
//! runs under a short exclusive lock; the reply is handed back as owned
//! bytes so nothing downstream touches the connection.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError};
use tokio::sync::Mutex;
use tracing::debug;

use super::traits::{DocumentStore, StoreError};
use crate::config::SearchEngineConfig;

pub struct RedisDocumentStore {
    connection: Mutex<ConnectionManager>,
    /// Optional key prefix for namespacing (e.g., "myapp:" → "myapp:employees")
    prefix: String,
}

impl RedisDocumentStore {
    /// Connect without a key prefix.
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        Self::with_prefix(connection_string, None).await
    }

    /// Connect with an optional key prefix prepended to every collection key.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use hash_search::storage::redis::RedisDocumentStore;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// // Collections resolve to "myapp:employees", "myapp:contractors", ...
    /// let store = RedisDocumentStore::with_prefix("redis://localhost", Some("myapp:")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_prefix(connection_string: &str, prefix: Option<&str>) -> Result<Self, StoreError> {
        let client = Client::open(connection_string)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            connection: Mutex::new(connection),
            prefix: prefix.unwrap_or("").to_string(),
        })
    }

    /// Connect using `redis_url` and `redis_prefix` from the engine config.
    pub async fn from_config(config: &SearchEngineConfig) -> Result<Self, StoreError> {
        let url = config
            .redis_url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("redis_url is not configured".into()))?;
        Self::with_prefix(url, config.redis_prefix.as_deref()).await
    }

    #[inline]
    fn prefixed_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}{}", self.prefix, key)
        }
    }

    /// Get the configured prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Classify a redis-rs error: transport failures become `Unavailable`,
/// anything the server said is forwarded as `Reply` with its code intact.
pub(crate) fn classify_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
        return StoreError::Unavailable(e.to_string());
    }
    match (e.code(), e.detail()) {
        (Some(code), Some(detail)) => StoreError::Reply(format!("{} {}", code, detail)),
        (Some(code), None) => StoreError::Reply(code.to_string()),
        _ => StoreError::Reply(e.to_string()),
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn list_values(&self, key: &str) -> Result<Vec<Vec<u8>>, StoreError> {
        let key = self.prefixed_key(key);

        let values: Result<Vec<Vec<u8>>, RedisError> = {
            let mut conn = self.connection.lock().await;
            cmd("HVALS").arg(&key).query_async(&mut *conn).await
        };

        let values = values.map_err(classify_redis_error)?;
        debug!(key = %key, count = values.len(), "HVALS");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = classify_redis_error(RedisError::from(io));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_server_error_is_forwarded() {
        let err = RedisError::from((
            ErrorKind::ExtensionError,
            "WRONGTYPE",
            "Operation against a key holding the wrong kind of value".to_string(),
        ));
        match classify_redis_error(err) {
            StoreError::Reply(msg) => {
                assert!(msg.starts_with("WRONGTYPE"));
                assert!(msg.contains("wrong kind of value"));
            }
            other => panic!("expected Reply, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_error_display_is_verbatim() {
        let err = StoreError::Reply("ERR something broke".into());
        assert_eq!(err.to_string(), "ERR something broke");
    }
}
