//! Integration tests against a real Redis.
//!
//! Tests use testcontainers for portability - no external docker-compose required.
//!
//! # Running Tests
//! ```bash
//! # Requires Docker
//! cargo test --test integration -- --ignored
//! ```

use std::sync::Arc;
use redis::AsyncCommands;

use hash_search::storage::redis::RedisDocumentStore;
use hash_search::{
    DocumentStore, SearchEngine, SearchEngineConfig, SearchError, SearchReply, StoreError,
};

use testcontainers::{clients::Cli, core::WaitFor, Container, GenericImage};

// =============================================================================
// Container Helpers
// =============================================================================

fn redis_container(docker: &Cli) -> Container<'_, GenericImage> {
    let image = GenericImage::new("redis", "7-alpine")
        .with_exposed_port(6379)
        .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"));
    docker.run(image)
}

async fn seed(url: &str, key: &str, docs: &[(&str, &str)]) {
    let client = redis::Client::open(url).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    for (field, doc) in docs {
        let _: () = conn.hset(key, *field, *doc).await.unwrap();
    }
}

const ANN: &str = r#"{"name":"Ann","department":"X","pin":"1","number":"100"}"#;
const BOB: &str = r#"{"name":"Bob","department":"Y","pin":"2","number":"200"}"#;

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn redis_search_end_to_end() {
    let docker = Cli::default();
    let redis = redis_container(&docker);
    let url = format!("redis://127.0.0.1:{}", redis.get_host_port_ipv4(6379));
    seed(&url, "staff", &[("a", ANN), ("b", BOB)]).await;

    let config = SearchEngineConfig {
        redis_url: Some(url),
        ..Default::default()
    };
    let engine = SearchEngine::connect(config).await.expect("connect");

    let reply = engine.search(&["staff", "", "-name", "0", "10"]).await.unwrap();
    assert_eq!(
        reply,
        SearchReply::Page {
            total: 2,
            documents: vec![BOB.as_bytes().to_vec(), ANN.as_bytes().to_vec()],
        }
    );

    let reply = engine.search(&["missing", "", "name", "0", "10"]).await.unwrap();
    assert_eq!(reply, SearchReply::Empty);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn redis_prefix_is_applied() {
    let docker = Cli::default();
    let redis = redis_container(&docker);
    let url = format!("redis://127.0.0.1:{}", redis.get_host_port_ipv4(6379));
    seed(&url, "app:staff", &[("a", ANN)]).await;

    let store = RedisDocumentStore::with_prefix(&url, Some("app:")).await.unwrap();
    assert_eq!(store.prefix(), "app:");
    let values = store.list_values("staff").await.unwrap();
    assert_eq!(values, vec![ANN.as_bytes().to_vec()]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn redis_wrong_type_is_forwarded() {
    let docker = Cli::default();
    let redis = redis_container(&docker);
    let url = format!("redis://127.0.0.1:{}", redis.get_host_port_ipv4(6379));

    let client = redis::Client::open(url.as_str()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let _: () = conn.set("plain", "string").await.unwrap();

    let store = RedisDocumentStore::connect(&url).await.unwrap();
    let engine = SearchEngine::new(SearchEngineConfig::default(), Arc::new(store));
    let err = engine.search(&["plain", "", "name", "0", "10"]).await.unwrap_err();
    match err {
        SearchError::Store(StoreError::Reply(msg)) => assert!(msg.contains("WRONGTYPE"), "{}", msg),
        other => panic!("expected store reply error, got {:?}", other),
    }
}
