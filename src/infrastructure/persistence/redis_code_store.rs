//! Redis implementation of the short code store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::repositories::{CodeStore, StoreError, code_ttl};

/// Short code store on Redis string keys.
///
/// Allocation uses a single `SET key url NX EX ttl` round trip, so two
/// concurrent writers of the same code cannot both succeed.
pub struct RedisCodeStore {
    client: ConnectionManager,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisCodeStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> Result<Self, StoreError> {
        info!("Connecting code store to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Unavailable(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {e}")))?;

        info!("✓ Code store connected to Redis");

        Ok(Self::with_manager(manager, op_timeout))
    }

    /// Builds a store over an already-established connection manager.
    pub fn with_manager(manager: ConnectionManager, op_timeout: Duration) -> Self {
        Self {
            client: manager,
            key_prefix: "short_url:".to_string(),
            op_timeout,
        }
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, RedisError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(|e| StoreError::Unavailable(e.to_string())),
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn store_if_not_exists(
        &self,
        code: &str,
        url: &str,
        ttl_seconds: i64,
    ) -> Result<bool, StoreError> {
        let key = self.build_key(code);
        let ttl = code_ttl(ttl_seconds);
        let mut conn = self.client.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(url).arg("NX").arg("EX").arg(ttl.as_secs());

        let reply = self
            .bounded(cmd.query_async::<Option<String>>(&mut conn))
            .await?;

        let stored = reply.is_some();
        debug!(code, stored, ttl_seconds = ttl.as_secs(), "Code SETNX");
        Ok(stored)
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        self.bounded(conn.get::<_, Option<String>>(&key))
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}
