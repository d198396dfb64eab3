//! Handlers for link creation and management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::clicks::{ClickInfo, ClickListResponse, ClicksQuery};
use crate::api::dto::links::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// Public. With a valid bearer token (and attribution enabled) the link is
/// owned by the signed-in user.
///
/// # Request Body
///
/// ```json
/// { "url": "example.com", "custom_code": "my-link" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "short_code": "my-link",
///   "short_url": "https://sn.ap/my-link",
///   "original_url": "https://example.com",
///   "click_count": 0,
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL or custom code (`details.kind`, `details.reason`)
/// - 409 if the custom code is taken
/// - 503 if no free code was found or storage is unavailable
pub async fn create_link_handler(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let owner = user.map(|Extension(CurrentUser(u))| u.id);
    let custom_code = payload
        .custom_code
        .as_deref()
        .filter(|c| !c.trim().is_empty());

    let link = state
        .link_service
        .create_link(&payload.url, custom_code, owner)
        .await?;

    let short_url = state.link_service.short_url(&link.short_code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}

/// Lists links newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=25`
///
/// With attribution enabled only the caller's links are listed.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state
        .link_service
        .list_links(Some(user.id), offset, limit)
        .await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.short_code);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(params.page(), params.page_size(), total),
        items,
    }))
}

/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link_for(id, user.id).await?;
    let short_url = state.link_service.short_url(&link.short_code);

    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Deletes a link and its click history.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// Returns `204 No Content`. Links owned by another user answer `404`.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Most recent clicks of one link.
///
/// # Endpoint
///
/// `GET /api/links/{id}/clicks?limit=50`
pub async fn link_clicks_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Query(query): Query<ClicksQuery>,
) -> Result<Json<ClickListResponse>, AppError> {
    let link = state.link_service.get_link_for(id, user.id).await?;

    let clicks = state
        .stats_service
        .recent_clicks(link.id, query.limit())
        .await?;

    Ok(Json(ClickListResponse {
        link_id: link.id,
        short_code: link.short_code,
        click_count: link.click_count,
        items: clicks.into_iter().map(ClickInfo::from).collect(),
    }))
}
