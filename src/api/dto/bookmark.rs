//! DTOs for the bookmark endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{BookmarkInput, BookmarkPatch};

/// Request body for `POST /api/bookmarks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookmarkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

impl From<CreateBookmarkRequest> for BookmarkInput {
    fn from(req: CreateBookmarkRequest) -> Self {
        Self {
            url: req.url,
            description: req.description,
        }
    }
}

/// Request body for `PATCH /api/bookmarks/{id}`.
///
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookmarkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<UpdateBookmarkRequest> for BookmarkPatch {
    fn from(req: UpdateBookmarkRequest) -> Self {
        Self {
            url: req.url,
            description: req.description,
        }
    }
}
