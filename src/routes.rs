//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`, `POST /` - Shortening form (public)
//! - `GET  /404`        - Unknown code page (public)
//! - `GET  /{code}`     - Short link redirect (public)
//! - `GET  /health`     - Storage health check (public)
//! - `/api/*`           - REST API (bearer session where required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer session, required or optional per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware.
///
/// Static paths (`/health`, `/404`, `/api/...`) take precedence over the
/// `/{code}` capture.
pub fn build_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let optional = api::routes::optional_auth_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::optional_layer),
    );

    let api_router = api::routes::public_routes()
        .merge(optional)
        .merge(protected);

    Router::new()
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the served application: [`build_router`] with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
