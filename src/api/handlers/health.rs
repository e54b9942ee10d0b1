//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: both authoritative stores reachable
/// - **503 Service Unavailable**: the bookmark store or the code store is down
///
/// The listing cache is advisory. When it is unreachable the status is
/// reported as `degraded` but the endpoint still answers 200.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "bookmark_store": { "status": "ok", "message": "Connected" },
///     "code_store": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "Connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (bookmark_ok, code_ok, cache_ok) = tokio::join!(
        state.bookmark_repository.health_check(),
        state.shorten_service.health_check(),
        state.cache.health_check(),
    );

    let checks = HealthChecks {
        bookmark_store: component("Bookmark store", bookmark_ok),
        code_store: component("Code store", code_ok),
        cache: component("Cache", cache_ok),
    };

    let stores_ok = checks.bookmark_store.is_ok() && checks.code_store.is_ok();
    let status = match (stores_ok, checks.cache.is_ok()) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if stores_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn component(name: &str, healthy: bool) -> CheckStatus {
    if healthy {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error(format!("{name} unreachable"))
    }
}
