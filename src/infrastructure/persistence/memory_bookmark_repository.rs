//! In-process bookmark repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, DashSet};
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Bookmark, BookmarkPatch, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

/// Bookmark repository held entirely in memory.
///
/// Used when no database is configured and by integration tests. Enforces
/// the same unique-code rule as the PostgreSQL schema.
pub struct MemoryBookmarkRepository {
    bookmarks: DashMap<i64, Bookmark>,
    codes: DashSet<String>,
    next_id: AtomicI64,
}

impl MemoryBookmarkRepository {
    pub fn new() -> Self {
        Self {
            bookmarks: DashMap::new(),
            codes: DashSet::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn owned_by(&self, user_id: &str) -> Vec<Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.value().clone())
            .collect()
    }
}

impl Default for MemoryBookmarkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkRepository for MemoryBookmarkRepository {
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        if !self.codes.insert(new_bookmark.code.clone()) {
            return Err(AppError::conflict(
                "Bookmark code already exists",
                json!({ "code": new_bookmark.code }),
            ));
        }

        let now = Utc::now();
        let bookmark = Bookmark {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: new_bookmark.user_id,
            url: new_bookmark.url,
            description: new_bookmark.description,
            code: new_bookmark.code,
            created_at: now,
            updated_at: now,
        };

        self.bookmarks.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn find_by_id(&self, user_id: &str, id: i64) -> Result<Option<Bookmark>, AppError> {
        Ok(self
            .bookmarks
            .get(&id)
            .filter(|b| b.user_id == user_id)
            .map(|b| b.value().clone()))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Bookmark>, AppError> {
        let mut owned = self.owned_by(user_id);
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        Ok(self.bookmarks.iter().filter(|b| b.user_id == user_id).count() as i64)
    }

    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError> {
        let mut entry = self
            .bookmarks
            .get_mut(&id)
            .filter(|b| b.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Bookmark not found", json!({ "id": id })))?;

        if let Some(url) = patch.url {
            entry.url = url;
        }
        if let Some(description) = patch.description {
            entry.description = description;
        }
        entry.updated_at = Utc::now();

        Ok(entry.value().clone())
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<bool, AppError> {
        match self.bookmarks.remove_if(&id, |_, b| b.user_id == user_id) {
            Some((_, removed)) => {
                self.codes.remove(&removed.code);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
