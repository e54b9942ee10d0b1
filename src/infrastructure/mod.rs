//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Group-keyed cache stores (Redis, in-memory, no-op)
//! - [`persistence`] - Bookmark repositories and short code stores

pub mod cache;
pub mod persistence;
