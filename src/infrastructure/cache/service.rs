//! Cache store trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// Callers on the request path treat every variant as advisory: a failed
/// cache call degrades to the authoritative store, it never fails a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache entry not found")]
    NotFound,
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache operation error: {0}")]
    Operation(String),
    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Group-keyed byte-blob cache.
///
/// A *group* is a namespace of related entries that are invalidated together;
/// an *item* is one entry inside a group. Writing any item refreshes the TTL
/// of the whole group, and deleting a group removes all of its items in one
/// atomic operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCacheStore`] - Redis hash per group
/// - [`crate::infrastructure::cache::MemoryCacheStore`] - In-process map of groups
/// - [`crate::infrastructure::cache::NullCacheStore`] - Caching disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Stores `value` under (`group`, `item`) and resets the group's TTL.
    async fn set_cache_data(
        &self,
        group: &str,
        item: &str,
        value: &[u8],
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Returns the payload stored under (`group`, `item`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the group or item is absent or expired.
    async fn get_cache_data(&self, group: &str, item: &str) -> CacheResult<Vec<u8>>;

    /// Removes the whole group atomically. Deleting a missing group succeeds.
    async fn delete_cache_data(&self, group: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
