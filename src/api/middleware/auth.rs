//! Bearer session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The signed-in user, inserted into request extensions by [`layer`] and
/// [`optional_layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The raw bearer token of the current request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Requires a valid session token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Look up the token digest among active sessions
/// 3. Load the session's user into [`CurrentUser`]
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// session is unknown or expired. The response carries
/// `WWW-Authenticate: Bearer` per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/stats", get(stats_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await?;
    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));
    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}

/// Authenticates the request only when an `Authorization` header is present.
///
/// Anonymous requests pass through untouched. A header with a bad or expired
/// token is still rejected with `401`.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    layer(State(st), req, next).await
}

async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    Ok(token)
}
