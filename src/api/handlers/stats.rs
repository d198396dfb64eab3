//! Handler for dashboard statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::DashboardResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns dashboard aggregates over all links.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "total_links": 12,
///   "total_clicks": 340,
///   "distinct_countries": 5,
///   "average_clicks_per_link": 28.33,
///   "daily_clicks": [{ "date": "2025-01-01", "clicks": 4 }],
///   "countries": [{ "label": "ET", "clicks": 200 }],
///   "devices": [{ "label": "mobile", "clicks": 180 }],
///   "browsers": [{ "label": "Chrome", "clicks": 150 }]
/// }
/// ```
///
/// `daily_clicks` always covers the last 30 days, including days without clicks.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = state.stats_service.dashboard().await?;
    Ok(Json(dashboard.into()))
}
