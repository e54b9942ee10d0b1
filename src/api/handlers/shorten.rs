//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a short code for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "expire_seconds": 3600   // optional, 0 = 24 hours
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "Ab3dE6g",
///   "short_url": "http://localhost:3000/Ab3dE6g",
///   "expire_seconds": 3600
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL is invalid or `expire_seconds` is out of range
/// - 409 Conflict if the generated code is already taken (not retried)
/// - 503 Service Unavailable if the code store is unreachable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    if payload.expire_seconds > state.max_expire_seconds {
        return Err(AppError::bad_request(
            "expire_seconds is too large",
            json!({ "max": state.max_expire_seconds }),
        ));
    }

    let code = state
        .shorten_service
        .shorten_url(&payload.url, payload.expire_seconds)
        .await?;

    let short_url = state.shorten_service.get_short_url(&state.base_url, &code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            code,
            short_url,
            expire_seconds: payload.expire_seconds,
        }),
    ))
}
