#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use bookmark_manager::domain::repositories::CodeStore;
use bookmark_manager::infrastructure::cache::{CacheStore, MemoryCacheStore};
use bookmark_manager::infrastructure::persistence::{MemoryBookmarkRepository, MemoryCodeStore};
use bookmark_manager::routes::router;
use bookmark_manager::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";
pub const MAX_TTL_SECONDS: i64 = 3600;

/// Handles to the in-memory backends behind a test server.
pub struct TestBackends {
    pub repository: Arc<MemoryBookmarkRepository>,
    pub code_store: Arc<MemoryCodeStore>,
    pub cache: Arc<MemoryCacheStore>,
}

pub fn create_test_state() -> (AppState, TestBackends) {
    let backends = TestBackends {
        repository: Arc::new(MemoryBookmarkRepository::new()),
        code_store: Arc::new(MemoryCodeStore::new()),
        cache: Arc::new(MemoryCacheStore::new()),
    };

    let state = AppState::new(
        backends.repository.clone(),
        backends.code_store.clone() as Arc<dyn CodeStore>,
        backends.cache.clone() as Arc<dyn CacheStore>,
        BASE_URL,
        MAX_TTL_SECONDS,
    );

    (state, backends)
}

pub fn create_test_server() -> (TestServer, TestBackends) {
    let (state, backends) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, backends)
}
