//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten (must be absolute).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Mapping lifetime in seconds. `0` or absent keeps the 24 hour default.
    ///
    /// The upper bound is configured at runtime and checked by the handler.
    #[serde(default)]
    #[validate(range(min = 0, message = "expire_seconds must not be negative"))]
    pub expire_seconds: i64,
}

/// Allocated short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub expire_seconds: i64,
}
