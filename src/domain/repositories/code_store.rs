//! Store contract for short code → URL mappings.

use async_trait::async_trait;
use std::time::Duration;

/// Lifetime of a mapping when the caller does not supply one.
pub const DEFAULT_CODE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves a caller-supplied TTL in seconds.
///
/// Non-positive values select [`DEFAULT_CODE_TTL`].
pub fn code_ttl(ttl_seconds: i64) -> Duration {
    if ttl_seconds <= 0 {
        DEFAULT_CODE_TTL
    } else {
        Duration::from_secs(ttl_seconds as u64)
    }
}

/// Errors returned by the authoritative code store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The key has no mapping, or its TTL has elapsed.
    #[error("key not found")]
    NotFound,
    /// The backend could not be reached or rejected the command.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The operation did not complete before its deadline.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Atomic set-if-absent store with per-mapping TTL.
///
/// Correctness of code allocation rests entirely on
/// [`CodeStore::store_if_not_exists`] being a single atomic operation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisCodeStore`] - `SET NX EX` on Redis
/// - [`crate::infrastructure::persistence::MemoryCodeStore`] - In-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Associates `url` with `code` only if `code` has no live mapping.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the mapping was written
    /// - `Ok(false)` if the code is already taken (not an error)
    ///
    /// `ttl_seconds <= 0` selects a 24 hour TTL.
    async fn store_if_not_exists(
        &self,
        code: &str,
        url: &str,
        ttl_seconds: i64,
    ) -> Result<bool, StoreError>;

    /// Returns the URL mapped to `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when there is no live mapping.
    async fn get(&self, code: &str) -> Result<String, StoreError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
