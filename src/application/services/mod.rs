//! Business logic services for the application layer.

pub mod bookmark_service;
pub mod cached_bookmark_service;
pub mod shorten_service;

pub use bookmark_service::{BookmarkService, PersistentBookmarkService};
pub use cached_bookmark_service::{BOOKMARK_LIST_TTL, BookmarkListKey, CachedBookmarkService};
pub use shorten_service::{ShortenError, ShortenService};

#[cfg(test)]
pub use bookmark_service::MockBookmarkService;
