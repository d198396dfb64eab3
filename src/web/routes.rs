//! Public page route configuration.

use crate::state::AppState;
use crate::web::handlers::{home_handler, not_found_handler, shorten_form_handler};
use axum::{Router, routing::get};

/// Server-rendered pages. No authentication.
///
/// # Endpoints
///
/// - `GET  /`    - Shortening form
/// - `POST /`    - Form submission
/// - `GET  /404` - Unknown short code page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler).post(shorten_form_handler))
        .route("/404", get(not_found_handler))
}
