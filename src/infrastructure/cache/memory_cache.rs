//! In-process cache store with group semantics.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::Expiry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound on the number of groups held at once.
const MAX_GROUPS: u64 = 10_000;

#[derive(Clone)]
struct Group {
    items: Arc<HashMap<String, Vec<u8>>>,
    ttl: Duration,
}

/// A group lives for the TTL of its most recent write.
struct GroupExpiry;

impl Expiry<String, Group> for GroupExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Group,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Group,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Cache store keeping groups in a `moka` cache.
///
/// Mirrors the Redis hash layout: one TTL per group, refreshed on every
/// write, and whole-group removal. Expired groups are evicted by the cache's
/// housekeeping.
pub struct MemoryCacheStore {
    groups: Cache<String, Group>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        let groups = Cache::builder()
            .max_capacity(MAX_GROUPS)
            .expire_after(GroupExpiry)
            .build();
        Self { groups }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn set_cache_data(
        &self,
        group: &str,
        item: &str,
        value: &[u8],
        ttl: Duration,
    ) -> CacheResult<()> {
        let item = item.to_string();
        let value = value.to_vec();

        self.groups
            .entry(group.to_string())
            .and_upsert_with(|existing| async move {
                let mut items = existing
                    .map(|e| HashMap::clone(&e.into_value().items))
                    .unwrap_or_default();
                items.insert(item, value);
                Group {
                    items: Arc::new(items),
                    ttl,
                }
            })
            .await;

        Ok(())
    }

    async fn get_cache_data(&self, group: &str, item: &str) -> CacheResult<Vec<u8>> {
        self.groups
            .get(group)
            .await
            .and_then(|g| g.items.get(item).cloned())
            .ok_or(CacheError::NotFound)
    }

    async fn delete_cache_data(&self, group: &str) -> CacheResult<()> {
        self.groups.invalidate(group).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
