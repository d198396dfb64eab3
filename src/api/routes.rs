//! API route configuration.
//!
//! Protected endpoints require a bearer session via
//! [`crate::api::middleware::auth`]; the wiring happens in [`crate::routes`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_clicks_handler,
    list_links_handler, login_handler, logout_handler, register_handler, session_handler,
    stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without signing in.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Open a session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Routes where a session is optional.
///
/// # Endpoints
///
/// - `POST /links` - Shorten a URL; attributed to the caller when signed in
pub fn optional_auth_routes() -> Router<AppState> {
    Router::new().route("/links", post(create_link_handler))
}

/// Routes requiring a bearer session.
///
/// # Endpoints
///
/// - `POST   /auth/logout`       - Revoke the current session
/// - `GET    /auth/session`      - Current user
/// - `GET    /links`             - List links (paginated)
/// - `GET    /links/{id}`        - One link
/// - `DELETE /links/{id}`        - Delete a link
/// - `GET    /links/{id}/clicks` - Recent clicks of a link
/// - `GET    /stats`             - Dashboard aggregates
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/auth/session", get(session_handler))
        .route("/links", get(list_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/clicks", get(link_clicks_handler))
        .route("/stats", get(stats_handler))
}
