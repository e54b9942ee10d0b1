//! PostgreSQL implementation of the bookmark repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Bookmark, BookmarkPatch, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str = "id, user_id, url, description, code, created_at, updated_at";

#[derive(FromRow)]
struct BookmarkRow {
    id: i64,
    user_id: String,
    url: String,
    description: String,
    code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(r: BookmarkRow) -> Self {
        Bookmark {
            id: r.id,
            user_id: r.user_id,
            url: r.url,
            description: r.description,
            code: r.code,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for bookmark storage and retrieval.
///
/// Expects a `bookmarks` table provisioned outside this service, with a
/// unique constraint on `code`. All statements are parameterized.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        let sql = format!(
            "INSERT INTO bookmarks (user_id, url, description, code) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, BookmarkRow>(&sql)
            .bind(&new_bookmark.user_id)
            .bind(&new_bookmark.url)
            .bind(&new_bookmark.description)
            .bind(&new_bookmark.code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict { .. } => AppError::conflict(
                    "Bookmark code already exists",
                    json!({ "code": new_bookmark.code }),
                ),
                other => other,
            })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, user_id: &str, id: i64) -> Result<Option<Bookmark>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2");

        let row = sqlx::query_as::<_, BookmarkRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Bookmark>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM bookmarks WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, BookmarkRow>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, AppError> {
        let sql = format!(
            "UPDATE bookmarks SET \
                url = COALESCE($3, url), \
                description = COALESCE($4, description), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, BookmarkRow>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(patch.url)
            .bind(patch.description)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("Bookmark not found", json!({ "id": id })))
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
