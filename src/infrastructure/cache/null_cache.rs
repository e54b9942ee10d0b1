//! No-op cache store for disabled caching.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache store that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every read
/// is a miss, so callers always fall through to the authoritative store.
pub struct NullCacheStore;

impl NullCacheStore {
    /// Creates a new NullCacheStore instance.
    pub fn new() -> Self {
        debug!("Using NullCacheStore (caching disabled)");
        Self
    }
}

impl Default for NullCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn set_cache_data(
        &self,
        _group: &str,
        _item: &str,
        _value: &[u8],
        _ttl: Duration,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn get_cache_data(&self, _group: &str, _item: &str) -> CacheResult<Vec<u8>> {
        Err(CacheError::NotFound)
    }

    async fn delete_cache_data(&self, _group: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
