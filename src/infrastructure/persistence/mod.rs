//! Authoritative store implementations.
//!
//! # Bookmarks
//!
//! - [`PgBookmarkRepository`] - PostgreSQL via SQLx
//! - [`MemoryBookmarkRepository`] - In-process, for development and tests
//!
//! # Short codes
//!
//! - [`RedisCodeStore`] - Redis `SET NX EX`
//! - [`MemoryCodeStore`] - In-process, for development and tests

pub mod memory_bookmark_repository;
pub mod memory_code_store;
pub mod pg_bookmark_repository;
pub mod redis_code_store;

pub use memory_bookmark_repository::MemoryBookmarkRepository;
pub use memory_code_store::MemoryCodeStore;
pub use pg_bookmark_repository::PgBookmarkRepository;
pub use redis_code_store::RedisCodeStore;
