//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod bookmarks;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use bookmarks::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, update_bookmark_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
