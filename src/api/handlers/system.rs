//! System endpoints: health check and funnel stage catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{FunnelStageInfo, HealthResponse};
use crate::app_state::AppState;
use crate::domain::FunnelStage;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/funnel-stages` — List funnel stages and their predicates.
#[utoipa::path(
    get,
    path = "/config/funnel-stages",
    tag = "System",
    summary = "List funnel stages",
    description = "Returns every funnel stage in order with the predicate a user must satisfy and the key of its trend series.",
    responses(
        (status = 200, description = "Funnel stage catalog", body = Vec<FunnelStageInfo>),
    )
)]
pub async fn funnel_stages_handler() -> impl IntoResponse {
    let stages: Vec<FunnelStageInfo> = FunnelStage::ALL.into_iter().map(Into::into).collect();
    (StatusCode::OK, Json(stages))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/funnel-stages", get(funnel_stages_handler))
}
