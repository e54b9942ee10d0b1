//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    BookmarkService, CachedBookmarkService, PersistentBookmarkService, ShortenService,
};
use crate::domain::repositories::{BookmarkRepository, CodeStore};
use crate::infrastructure::cache::CacheStore;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn CodeStore>>,
    /// Cached bookmark service; handlers never see the undecorated one.
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub bookmark_repository: Arc<dyn BookmarkRepository>,
    pub cache: Arc<dyn CacheStore>,
    pub base_url: String,
    /// Largest `expire_seconds` accepted by `POST /api/shorten`.
    pub max_expire_seconds: i64,
}

impl AppState {
    /// Wires the services over the given backends.
    ///
    /// The bookmark service is always wrapped in [`CachedBookmarkService`];
    /// pass a `NullCacheStore` to run without caching.
    pub fn new(
        bookmark_repository: Arc<dyn BookmarkRepository>,
        code_store: Arc<dyn CodeStore>,
        cache: Arc<dyn CacheStore>,
        base_url: impl Into<String>,
        max_expire_seconds: i64,
    ) -> Self {
        let inner = PersistentBookmarkService::new(bookmark_repository.clone());
        let bookmark_service: Arc<dyn BookmarkService> =
            Arc::new(CachedBookmarkService::new(inner, cache.clone()));

        Self {
            shorten_service: Arc::new(ShortenService::new(code_store)),
            bookmark_service,
            bookmark_repository,
            cache,
            base_url: base_url.into(),
            max_expire_seconds,
        }
    }
}
