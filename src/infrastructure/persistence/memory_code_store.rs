//! In-process short code store.

use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::Expiry;
use std::time::{Duration, Instant};

use crate::domain::repositories::{CodeStore, StoreError, code_ttl};

#[derive(Clone)]
struct Mapping {
    url: String,
    ttl: Duration,
}

/// Each mapping lives for the TTL it was stored with.
struct MappingExpiry;

impl Expiry<String, Mapping> for MappingExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Mapping,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Code store backed by a `moka` cache.
///
/// `entry().or_insert_with` runs the check and the insert under the entry
/// lock, which gives the same set-if-absent guarantee as Redis `SET NX`.
/// Expired mappings are evicted by the cache's housekeeping. Mappings are
/// only visible to the process that wrote them.
pub struct MemoryCodeStore {
    mappings: Cache<String, Mapping>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        let mappings = Cache::builder().expire_after(MappingExpiry).build();
        Self { mappings }
    }
}

impl Default for MemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn store_if_not_exists(
        &self,
        code: &str,
        url: &str,
        ttl_seconds: i64,
    ) -> Result<bool, StoreError> {
        let mapping = Mapping {
            url: url.to_string(),
            ttl: code_ttl(ttl_seconds),
        };

        let entry = self
            .mappings
            .entry(code.to_string())
            .or_insert_with(async move { mapping })
            .await;

        Ok(entry.is_fresh())
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        self.mappings
            .get(code)
            .await
            .map(|m| m.url)
            .ok_or(StoreError::NotFound)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::DEFAULT_CODE_TTL;

    #[tokio::test]
    async fn test_store_is_write_once() {
        let store = MemoryCodeStore::new();

        assert!(store
            .store_if_not_exists("abc1234", "https://first.example", 60)
            .await
            .unwrap());
        assert!(!store
            .store_if_not_exists("abc1234", "https://second.example", 60)
            .await
            .unwrap());

        assert_eq!(store.get("abc1234").await.unwrap(), "https://first.example");
    }

    #[tokio::test]
    async fn test_concurrent_stores_have_single_winner() {
        let store = std::sync::Arc::new(MemoryCodeStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .store_if_not_exists("race123", &format!("https://{i}.example"), 60)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_code_is_not_found() {
        let store = MemoryCodeStore::new();
        assert_eq!(store.get("missing").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_mapping_expires_after_ttl() {
        let store = MemoryCodeStore::new();
        store
            .store_if_not_exists("abc1234", "https://example.com", 1)
            .await
            .unwrap();

        assert!(store.get("abc1234").await.is_ok());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.get("abc1234").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_expired_code_can_be_reallocated() {
        let store = MemoryCodeStore::new();
        store
            .store_if_not_exists("abc1234", "https://old.example", 1)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store
            .store_if_not_exists("abc1234", "https://new.example", 60)
            .await
            .unwrap());
        assert_eq!(store.get("abc1234").await.unwrap(), "https://new.example");
    }

    #[tokio::test]
    async fn test_expired_mappings_are_evicted() {
        let store = MemoryCodeStore::new();
        for i in 0..500 {
            store
                .store_if_not_exists(&format!("code{i}"), "https://example.com", 1)
                .await
                .unwrap();
        }
        store.mappings.run_pending_tasks().await;
        assert_eq!(store.mappings.entry_count(), 500);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        store.mappings.run_pending_tasks().await;

        assert_eq!(store.mappings.entry_count(), 0);
    }

    #[test]
    fn test_non_positive_ttl_uses_default() {
        let mapping = Mapping {
            url: "https://example.com".to_string(),
            ttl: code_ttl(0),
        };

        let ttl = MappingExpiry.expire_after_create(&"abc1234".to_string(), &mapping, Instant::now());
        assert_eq!(ttl, Some(DEFAULT_CODE_TTL));
    }
}
