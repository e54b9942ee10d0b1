//! Redis-backed stores against a live server.
//!
//! Runs only when `REDIS_URL` is set; otherwise every test returns early.
//! Tests are serialized because one of them pauses writes server-wide.

use bookmark_manager::domain::repositories::{CodeStore, StoreError};
use bookmark_manager::infrastructure::cache::{CacheError, CacheStore, RedisCacheStore};
use bookmark_manager::infrastructure::persistence::RedisCodeStore;
use redis::aio::MultiplexedConnection;
use serial_test::serial;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const OP_TIMEOUT: Duration = Duration::from_secs(2);

fn redis_url() -> Option<String> {
    let url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty());
    if url.is_none() {
        eprintln!("REDIS_URL not set, skipping Redis store test");
    }
    url
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}{}{nanos}", std::process::id())
}

async fn admin(url: &str) -> MultiplexedConnection {
    redis::Client::open(url)
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap()
}

async fn ttl_of(conn: &mut MultiplexedConnection, key: &str) -> i64 {
    redis::cmd("TTL").arg(key).query_async(conn).await.unwrap()
}

#[tokio::test]
#[serial]
async fn test_code_store_second_write_loses() {
    let Some(url) = redis_url() else { return };
    let store = RedisCodeStore::connect(&url, OP_TIMEOUT).await.unwrap();
    let code = unique("w");

    assert!(store
        .store_if_not_exists(&code, "https://first.example", 60)
        .await
        .unwrap());
    assert!(!store
        .store_if_not_exists(&code, "https://second.example", 60)
        .await
        .unwrap());

    assert_eq!(store.get(&code).await.unwrap(), "https://first.example");
}

#[tokio::test]
#[serial]
async fn test_code_store_applies_ttl() {
    let Some(url) = redis_url() else { return };
    let store = RedisCodeStore::connect(&url, OP_TIMEOUT).await.unwrap();
    let mut conn = admin(&url).await;
    let code = unique("t");

    store
        .store_if_not_exists(&code, "https://example.com", 120)
        .await
        .unwrap();
    let ttl = ttl_of(&mut conn, &format!("short_url:{code}")).await;
    assert!((1..=120).contains(&ttl), "ttl = {ttl}");

    let missing = unique("m");
    assert_eq!(store.get(&missing).await, Err(StoreError::NotFound));
}

#[tokio::test]
#[serial]
async fn test_cache_write_refreshes_sibling_ttl() {
    let Some(url) = redis_url() else { return };
    let cache = RedisCacheStore::connect(&url, OP_TIMEOUT).await.unwrap();
    let mut conn = admin(&url).await;
    let group = unique("get_bookmarks_");
    let hour = Duration::from_secs(3600);

    cache.set_cache_data(&group, "0_10", b"page1", hour).await.unwrap();
    redis::cmd("EXPIRE")
        .arg(&group)
        .arg(5)
        .query_async::<()>(&mut conn)
        .await
        .unwrap();
    assert!(ttl_of(&mut conn, &group).await <= 5);

    cache.set_cache_data(&group, "10_10", b"page2", hour).await.unwrap();

    assert!(ttl_of(&mut conn, &group).await > 5);
    assert_eq!(cache.get_cache_data(&group, "0_10").await.unwrap(), b"page1");
    assert_eq!(cache.get_cache_data(&group, "10_10").await.unwrap(), b"page2");

    cache.delete_cache_data(&group).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_cache_delete_removes_every_item() {
    let Some(url) = redis_url() else { return };
    let cache = RedisCacheStore::connect(&url, OP_TIMEOUT).await.unwrap();
    let group = unique("get_bookmarks_");
    let other = unique("get_bookmarks_other");
    let hour = Duration::from_secs(3600);

    for item in ["0_10", "10_10", "20_10"] {
        cache.set_cache_data(&group, item, b"v", hour).await.unwrap();
    }
    cache.set_cache_data(&other, "0_10", b"v", hour).await.unwrap();

    cache.delete_cache_data(&group).await.unwrap();

    for item in ["0_10", "10_10", "20_10"] {
        assert_eq!(
            cache.get_cache_data(&group, item).await,
            Err(CacheError::NotFound)
        );
    }
    assert!(cache.get_cache_data(&other, "0_10").await.is_ok());

    cache.delete_cache_data(&other).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_stalled_writes_time_out() {
    let Some(url) = redis_url() else { return };
    let op_timeout = Duration::from_millis(100);
    let store = RedisCodeStore::connect(&url, op_timeout).await.unwrap();
    let cache = RedisCacheStore::connect(&url, op_timeout).await.unwrap();
    let mut conn = admin(&url).await;

    redis::cmd("CLIENT")
        .arg("PAUSE")
        .arg(1000)
        .arg("WRITE")
        .query_async::<()>(&mut conn)
        .await
        .unwrap();

    let stored = store
        .store_if_not_exists(&unique("p"), "https://example.com", 60)
        .await;
    let cached = cache
        .set_cache_data(&unique("get_bookmarks_"), "0_10", b"v", Duration::from_secs(60))
        .await;

    redis::cmd("CLIENT")
        .arg("UNPAUSE")
        .query_async::<()>(&mut conn)
        .await
        .unwrap();

    assert_eq!(stored, Err(StoreError::Timeout(op_timeout)));
    assert_eq!(cached, Err(CacheError::Timeout(op_timeout)));
}
