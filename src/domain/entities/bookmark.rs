//! Bookmark entity and its listing envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A URL saved by a user.
///
/// Every bookmark carries an 8-character code assigned at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: String,
    pub url: String,
    pub description: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a bookmark.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkInput {
    pub url: String,
    pub description: String,
}

/// Insert payload handed to the repository, with the allocated code.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub user_id: String,
    pub url: String,
    pub description: String,
    pub code: String,
}

/// Partial update for an existing bookmark.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.description.is_none()
    }
}

/// One page of a user's bookmarks plus the user's total bookmark count.
///
/// This is the unit stored in the listing cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedBookmarks {
    pub data: Vec<Bookmark>,
    pub total: i64,
}
