//! Liveness and storage health check.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthResponse, ProbeStatus, ServiceStatus, StorageProbe};
use crate::state::AppState;

/// Reports whether the store answers queries.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": { "status": "ok", "links": 12 }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match state.link_service.count_links().await {
        Ok(count) => StorageProbe::reachable(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check storage probe failed");
            StorageProbe::failed("storage unreachable")
        }
    };

    let (code, status) = match storage.status {
        ProbeStatus::Ok => (StatusCode::OK, ServiceStatus::Healthy),
        ProbeStatus::Error => (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Degraded),
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage,
    };

    (code, Json(body))
}
