//! Cache-aside decorator for the bookmark service.
//!
//! Listing results are cached per (user, pagination window) in one cache
//! group per user. Every mutation drops the user's whole group before the
//! write is delegated, so later listings repopulate from the inner service.
//!
//! The cache is advisory: its failures are logged and swallowed, and only the
//! inner service's errors ever reach the caller. Invalidation runs before the
//! inner write, so a listing that races a mutation can repopulate the group
//! with pre-mutation data until the next mutation or the TTL ends.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::entities::{Bookmark, BookmarkInput, BookmarkPatch, PaginatedBookmarks};
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;

/// Lifetime of a cached listing group.
pub const BOOKMARK_LIST_TTL: Duration = Duration::from_secs(60 * 60);

const GROUP_PREFIX: &str = "get_bookmarks_";

/// Identity of one cached listing window.
///
/// Rendered to the store's string keys only at the cache boundary:
/// group `get_bookmarks_<user>`, item `<offset>_<limit>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookmarkListKey<'a> {
    pub user_id: &'a str,
    pub offset: i64,
    pub limit: i64,
}

impl<'a> BookmarkListKey<'a> {
    pub fn new(user_id: &'a str, offset: i64, limit: i64) -> Self {
        Self {
            user_id,
            offset,
            limit,
        }
    }

    /// Cache group holding every window of this user's listing.
    pub fn group(&self) -> String {
        group_key(self.user_id)
    }

    /// Cache item for this particular window.
    pub fn item(&self) -> String {
        format!("{}_{}", self.offset, self.limit)
    }
}

impl fmt::Display for BookmarkListKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group(), self.item())
    }
}

fn group_key(user_id: &str) -> String {
    format!("{GROUP_PREFIX}{user_id}")
}

/// Decorates a [`BookmarkService`] with a listing cache.
///
/// `get_bookmarks` is served cache-aside; `create`, `update` and `delete`
/// invalidate the acting user's group and then delegate; `get_bookmark` is
/// forwarded untouched.
pub struct CachedBookmarkService<S: BookmarkService, C: CacheStore + ?Sized> {
    inner: S,
    cache: Arc<C>,
}

impl<S: BookmarkService, C: CacheStore + ?Sized> CachedBookmarkService<S, C> {
    pub fn new(inner: S, cache: Arc<C>) -> Self {
        Self { inner, cache }
    }

    async fn invalidate(&self, user_id: &str) {
        let group = group_key(user_id);
        if let Err(e) = self.cache.delete_cache_data(&group).await {
            warn!(error = %e, group = %group, "Failed to invalidate bookmark cache");
        }
    }

    async fn read_cached(&self, key: &BookmarkListKey<'_>) -> Option<PaginatedBookmarks> {
        let payload = match self.cache.get_cache_data(&key.group(), &key.item()).await {
            Ok(payload) if !payload.is_empty() => payload,
            Ok(_) => {
                debug!(%key, "Bookmark cache MISS (empty payload)");
                return None;
            }
            Err(e) => {
                debug!(%key, error = %e, "Bookmark cache MISS");
                return None;
            }
        };

        match serde_json::from_slice::<PaginatedBookmarks>(&payload) {
            Ok(page) => {
                debug!(%key, "Bookmark cache HIT");
                Some(page)
            }
            Err(e) => {
                warn!(%key, error = %e, "Discarding undecodable bookmark cache entry");
                None
            }
        }
    }

    async fn write_cached(&self, key: &BookmarkListKey<'_>, page: &PaginatedBookmarks) {
        let payload = match serde_json::to_vec(page) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%key, error = %e, "Failed to encode bookmark page for cache");
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set_cache_data(&key.group(), &key.item(), &payload, BOOKMARK_LIST_TTL)
            .await
        {
            warn!(%key, error = %e, "Failed to populate bookmark cache");
        }
    }
}

#[async_trait]
impl<S: BookmarkService, C: CacheStore + ?Sized> BookmarkService for CachedBookmarkService<S, C> {
    async fn create(&self, user_id: &str, input: BookmarkInput) -> Result<Bookmark, AppError> {
        self.invalidate(user_id).await;
        self.inner.create(user_id, input).await
    }

    async fn get_bookmark(&self, user_id: &str, id: i64) -> Result<Bookmark, AppError> {
        self.inner.get_bookmark(user_id, id).await
    }

    async fn get_bookmarks(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<PaginatedBookmarks, AppError> {
        let key = BookmarkListKey::new(user_id, offset, limit);

        if let Some(page) = self.read_cached(&key).await {
            return Ok(page);
        }

        let page = self.inner.get_bookmarks(user_id, offset, limit).await?;
        self.write_cached(&key, &page).await;

        Ok(page)
    }

    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError> {
        self.invalidate(user_id).await;
        self.inner.update(user_id, id, patch).await
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError> {
        self.invalidate(user_id).await;
        self.inner.delete(user_id, id).await
    }
}
