//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the authoritative stores. Concrete implementations
//! live in `crate::infrastructure::persistence`; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`BookmarkRepository`] - User-scoped bookmark CRUD and listing
//! - [`CodeStore`] - Atomic short code → URL mappings

pub mod bookmark_repository;
pub mod code_store;

pub use bookmark_repository::BookmarkRepository;
pub use code_store::{CodeStore, DEFAULT_CODE_TTL, StoreError, code_ttl};

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use code_store::MockCodeStore;
