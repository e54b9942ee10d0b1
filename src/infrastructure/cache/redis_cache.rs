//! Redis-backed cache store.

use super::service::{CacheError, CacheResult, CacheStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Cache store mapping each group to a Redis hash.
///
/// Items are hash fields; the TTL lives on the hash key, so every write
/// refreshes expiry for all sibling items and `DEL` drops the whole group.
/// Uses a `ConnectionManager` so one multiplexed connection is shared by all
/// requests and re-established automatically after failures.
pub struct RedisCacheStore {
    client: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCacheStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - Upper bound for each individual cache command
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!("Connecting cache store to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        Self::from_manager(manager, op_timeout).await
    }

    /// Wraps an existing connection manager, validating it with a PING.
    pub async fn from_manager(manager: ConnectionManager, op_timeout: Duration) -> CacheResult<Self> {
        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!("✓ Cache store connected to Redis");

        Ok(Self {
            client: manager,
            op_timeout,
        })
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, RedisError>>,
    ) -> CacheResult<T> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(map_redis_error),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

fn map_redis_error(e: RedisError) -> CacheError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
        CacheError::Connection(e.to_string())
    } else {
        CacheError::Operation(e.to_string())
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn set_cache_data(
        &self,
        group: &str,
        item: &str,
        value: &[u8],
        ttl: Duration,
    ) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1) as i64;

        let mut pipe = redis::pipe();
        pipe.atomic()
            .hset(group, item, value)
            .ignore()
            .expire(group, ttl_seconds)
            .ignore();

        self.bounded(pipe.query_async::<()>(&mut conn)).await?;

        debug!(group, item, ttl_seconds, "Cache SET");
        Ok(())
    }

    async fn get_cache_data(&self, group: &str, item: &str) -> CacheResult<Vec<u8>> {
        let mut conn = self.client.clone();

        let value = self
            .bounded(conn.hget::<_, _, Option<Vec<u8>>>(group, item))
            .await?;

        value.ok_or(CacheError::NotFound)
    }

    async fn delete_cache_data(&self, group: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let deleted = self.bounded(conn.del::<_, i64>(group)).await?;
        if deleted > 0 {
            debug!(group, "Cache group deleted");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}
