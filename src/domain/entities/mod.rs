//! Core domain entities.
//!
//! Entities are plain data structures. Creation and update inputs live next
//! to the entity they produce:
//!
//! - [`Bookmark`] - A saved URL owned by a user
//! - [`BookmarkInput`] / [`NewBookmark`] - Creation payloads
//! - [`BookmarkPatch`] - Partial updates
//! - [`PaginatedBookmarks`] - A listing page, the unit of listing cache entries

pub mod bookmark;

pub use bookmark::{Bookmark, BookmarkInput, BookmarkPatch, NewBookmark, PaginatedBookmarks};
