//! Health check handler

use axum::Json;
use stem_service::dto::HealthResponse;

/// Liveness probe, no authentication
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
