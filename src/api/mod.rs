//! REST API layer for HTTP request/response handling.
//!
//! This layer validates input, calls the application services and formats
//! responses. Services never see unvalidated pagination or URLs.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Caller identity and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
