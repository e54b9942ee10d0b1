//! API route configuration.
//!
//! Bookmark routes require the trusted `X-User-Id` header, checked by
//! [`crate::api::middleware::identity`].

use crate::api::handlers::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, shorten_handler, update_bookmark_handler,
};
use crate::api::middleware::identity;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`         - Allocate a short code
/// - `GET    /bookmarks`       - List bookmarks (paginated, cached)
/// - `POST   /bookmarks`       - Create a bookmark
/// - `GET    /bookmarks/{id}`  - Fetch a bookmark
/// - `PATCH  /bookmarks/{id}`  - Partially update a bookmark
/// - `DELETE /bookmarks/{id}`  - Delete a bookmark
pub fn api_routes() -> Router<AppState> {
    let bookmarks = Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route(
            "/bookmarks/{id}",
            get(get_bookmark_handler)
                .patch(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
        .route_layer(middleware::from_fn(identity::layer));

    Router::new()
        .route("/shorten", post(shorten_handler))
        .merge(bookmarks)
}
