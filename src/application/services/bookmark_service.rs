//! Bookmark service contract and its authoritative implementation.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Bookmark, BookmarkInput, BookmarkPatch, NewBookmark, PaginatedBookmarks,
};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{BOOKMARK_CODE_LENGTH, CodeGenerator, SecureCodeGenerator};

/// Operations on a user's bookmarks.
///
/// Both the authoritative [`PersistentBookmarkService`] and the caching
/// decorator [`crate::application::services::CachedBookmarkService`]
/// implement this trait, so handlers never know which one they hold.
///
/// `user_id` is a trusted identity established upstream; `offset` and
/// `limit` arrive already validated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkService: Send + Sync {
    /// Creates a bookmark with a freshly allocated 8-character code.
    async fn create(&self, user_id: &str, input: BookmarkInput) -> Result<Bookmark, AppError>;

    /// Fetches one bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no bookmark with this id.
    async fn get_bookmark(&self, user_id: &str, id: i64) -> Result<Bookmark, AppError>;

    /// Returns one window of the user's bookmarks with the user's total count.
    async fn get_bookmarks(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<PaginatedBookmarks, AppError>;

    /// Applies a partial update.
    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError>;

    /// Deletes a bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was deleted.
    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError>;
}

/// Bookmark service backed directly by a [`BookmarkRepository`].
pub struct PersistentBookmarkService<R: BookmarkRepository + ?Sized, G: CodeGenerator = SecureCodeGenerator> {
    repository: Arc<R>,
    generator: G,
}

impl<R: BookmarkRepository + ?Sized> PersistentBookmarkService<R> {
    /// Creates a new bookmark service.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, SecureCodeGenerator::new())
    }
}

impl<R: BookmarkRepository + ?Sized, G: CodeGenerator> PersistentBookmarkService<R, G> {
    pub fn with_generator(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Checks that the bookmark store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

#[async_trait]
impl<R: BookmarkRepository + ?Sized, G: CodeGenerator> BookmarkService
    for PersistentBookmarkService<R, G>
{
    async fn create(&self, user_id: &str, input: BookmarkInput) -> Result<Bookmark, AppError> {
        let code = self.generator.generate_code(BOOKMARK_CODE_LENGTH)?;

        let new_bookmark = NewBookmark {
            user_id: user_id.to_string(),
            url: input.url,
            description: input.description,
            code,
        };

        self.repository.create(new_bookmark).await
    }

    async fn get_bookmark(&self, user_id: &str, id: i64) -> Result<Bookmark, AppError> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Bookmark not found", json!({ "id": id })))
    }

    async fn get_bookmarks(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<PaginatedBookmarks, AppError> {
        let data = self.repository.list_by_user(user_id, offset, limit).await?;
        let total = self.repository.count_by_user(user_id).await?;

        Ok(PaginatedBookmarks { data, total })
    }

    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError> {
        self.repository.update(user_id, id, patch).await
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError> {
        if self.repository.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Bookmark not found",
                json!({ "id": id }),
            ))
        }
    }
}
