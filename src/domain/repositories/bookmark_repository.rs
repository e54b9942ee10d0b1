//! Repository trait for bookmark data access.

use crate::domain::entities::{Bookmark, BookmarkPatch, NewBookmark};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user-owned bookmarks.
///
/// Every lookup and mutation is scoped to a user: a bookmark that exists but
/// belongs to someone else is reported as not found.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryBookmarkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Inserts a bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the bookmark code is already taken.
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError>;

    /// Finds one of the user's bookmarks by id.
    async fn find_by_id(&self, user_id: &str, id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Lists a window of the user's bookmarks, newest first.
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Bookmark>, AppError>;

    /// Counts all of the user's bookmarks.
    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no bookmark with this id.
    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError>;

    /// Deletes a bookmark. Returns `Ok(false)` if nothing matched.
    async fn delete(&self, user_id: &str, id: i64) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
