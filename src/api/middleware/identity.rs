//! Trusted caller identity.
//!
//! An upstream gateway authenticates the user and forwards the id in
//! `X-User-Id`. This layer only checks that the header is present.

use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::json;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller, inserted as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

/// Rejects requests without a usable `X-User-Id` header.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, blank, or not
/// valid ASCII.
///
/// # Example
///
/// ```rust,ignore
/// let bookmarks = Router::new()
///     .route("/bookmarks", get(list_bookmarks_handler))
///     .route_layer(middleware::from_fn(identity::layer));
/// ```
pub async fn layer(mut req: Request, next: Next) -> Result<Response, AppError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "X-User-Id header is missing or invalid" }),
            )
        })?;

    req.extensions_mut().insert(UserId(user_id));

    Ok(next.run(req).await)
}
