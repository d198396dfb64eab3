//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue},
    response::Redirect,
};
use tracing::{debug, error};

use crate::application::services::RedirectOutcome;
use crate::state::AppState;
use crate::utils::request_metadata::visitor_from_headers;

/// Path of the page shown for unknown codes.
pub const NOT_FOUND_PATH: &str = "/404";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Build visitor metadata from `User-Agent` and the configured country header
/// 2. Resolve the code (click recording happens inside the service)
/// 3. Return the redirect
///
/// # Responses
///
/// - **307 Temporary Redirect** to the destination when the code exists
/// - **303 See Other** to `/404` when it does not
/// - **303 See Other** to `FALLBACK_URL` when storage is unavailable
///
/// Never answers with an error body: visitors always land on a page.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Redirect {
    let visitor = visitor_from_headers(&headers, state.country_header.as_deref());

    match state.redirect_service.resolve(&code, &visitor).await {
        Ok(RedirectOutcome::Redirect(destination)) => {
            if HeaderValue::from_str(&destination).is_err() {
                error!(code, "Stored destination is not a valid Location value");
                return Redirect::to(&state.fallback_url);
            }
            Redirect::temporary(&destination)
        }
        Ok(RedirectOutcome::NotFound) => {
            debug!(code, "Short code not found");
            Redirect::to(NOT_FOUND_PATH)
        }
        Err(e) => {
            error!(code, error = %e, "Redirect lookup failed");
            Redirect::to(&state.fallback_url)
        }
    }
}
