//! Group-keyed caching layer.
//!
//! Provides a [`CacheStore`] trait with three implementations:
//! - [`RedisCacheStore`] - Production Redis-backed store (one hash per group)
//! - [`MemoryCacheStore`] - In-process store for development and tests
//! - [`NullCacheStore`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCacheStore;
pub use null_cache::NullCacheStore;
pub use redis_cache::RedisCacheStore;
pub use service::{CacheError, CacheResult, CacheStore};

#[cfg(test)]
pub use service::MockCacheStore;
