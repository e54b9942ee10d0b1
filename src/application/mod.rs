//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and give HTTP handlers a
//! narrow API.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Short code allocation and resolution
//! - [`services::PersistentBookmarkService`] - Bookmark CRUD over a repository
//! - [`services::CachedBookmarkService`] - Listing cache in front of any bookmark service

pub mod services;
