//! Handlers for bookmark endpoints.
//!
//! All routes sit behind [`crate::api::middleware::identity`], so every
//! handler receives the caller's [`UserId`].

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::bookmark::{CreateBookmarkRequest, UpdateBookmarkRequest};
use crate::api::dto::pagination::PaginationParams;
use crate::api::middleware::identity::UserId;
use crate::domain::entities::{Bookmark, BookmarkPatch, PaginatedBookmarks};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's bookmarks, newest first.
///
/// # Endpoint
///
/// `GET /api/bookmarks?offset=0&limit=10`
///
/// # Response
///
/// ```json
/// {
///   "data": [ { "id": 2, "url": "...", "code": "aB3dE6gH", ... } ],
///   "total": 2
/// }
/// ```
///
/// Served through the listing cache; any create, update or delete by the
/// same user drops every cached window.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedBookmarks>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request("Invalid pagination", json!({ "reason": e })))?;

    let page = state
        .bookmark_service
        .get_bookmarks(&user_id, offset, limit)
        .await?;

    Ok(Json(page))
}

/// Creates a bookmark.
///
/// # Endpoint
///
/// `POST /api/bookmarks`
///
/// ```json
/// { "url": "https://example.com", "description": "Example" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on validation failure
/// - 409 Conflict if the generated bookmark code already exists
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Json(payload): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    payload.validate()?;

    let bookmark = state
        .bookmark_service
        .create(&user_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// Fetches one of the caller's bookmarks.
///
/// `GET /api/bookmarks/{id}`
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<Json<Bookmark>, AppError> {
    let bookmark = state.bookmark_service.get_bookmark(&user_id, id).await?;
    Ok(Json(bookmark))
}

/// Partially updates a bookmark.
///
/// # Endpoint
///
/// `PATCH /api/bookmarks/{id}`
///
/// All fields are optional, but at least one must be present.
///
/// # Errors
///
/// - 400 Bad Request if validation fails or the body is empty
/// - 404 Not Found if the caller has no bookmark with this id
pub async fn update_bookmark_handler(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBookmarkRequest>,
) -> Result<Json<Bookmark>, AppError> {
    payload.validate()?;

    let patch = BookmarkPatch::from(payload);
    if patch.is_empty() {
        return Err(AppError::bad_request(
            "Nothing to update",
            json!({ "fields": ["url", "description"] }),
        ));
    }

    let bookmark = state.bookmark_service.update(&user_id, id, patch).await?;

    Ok(Json(bookmark))
}

/// Deletes a bookmark.
///
/// `DELETE /api/bookmarks/{id}` returns `204 No Content`, or 404 if the
/// caller has no bookmark with this id.
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.bookmark_service.delete(&user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
