//! Handlers for account and session endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, RegisterRequest, SessionResponse, UserInfo};
use crate::api::middleware::auth::{CurrentUser, SessionToken};
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// Returns `201 Created` with the public account view. Does not sign in.
///
/// # Errors
///
/// - 400 if email, name or password fail validation
/// - 409 if the email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.email, &payload.name, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Signs in with email and password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Response
///
/// ```json
/// {
///   "token": "q3V...",
///   "token_type": "Bearer",
///   "expires_at": "2025-01-08T00:00:00Z",
///   "user": { "id": 1, "email": "ada@example.com", "name": "Ada", "created_at": "..." }
/// }
/// ```
///
/// # Errors
///
/// Returns 401 for unknown email or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Revokes the current session.
///
/// `POST /api/auth/logout` → `204 No Content`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the signed-in user.
///
/// `GET /api/auth/session`
pub async fn session_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserInfo> {
    Json(user.into())
}
