//! Funnel handlers: stage summary and cumulative trends.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::session::RequestSession;
use crate::app_state::AppState;
use crate::domain::{FunnelSummary, FunnelTrends};
use crate::error::{AnalyticsError, ErrorResponse};

/// `GET /funnel/summary` — Stage counts and conversion rates.
///
/// # Errors
///
/// Returns a session or upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/funnel/summary",
    tag = "Funnel",
    summary = "Funnel summary",
    description = "Users per stage (started, connected, completed) and conversion percentages relative to started. Stages are independent membership tests.",
    responses(
        (status = 200, description = "Counts and rates", body = FunnelSummary),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn funnel_summary(
    State(state): State<AppState>,
    session: RequestSession,
) -> Result<impl IntoResponse, AnalyticsError> {
    let summary = state
        .analytics_service
        .funnel_summary(session.session())
        .await?;
    Ok(Json(summary))
}

/// `GET /funnel/trends` — Cumulative daily series per stage.
///
/// # Errors
///
/// Returns a session or upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/funnel/trends",
    tag = "Funnel",
    summary = "Funnel trends",
    description = "One point per distinct activity date, ascending, with cumulative user counts. Users without an activity timestamp are excluded.",
    responses(
        (status = 200, description = "Three aligned series", body = FunnelTrends),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn funnel_trends(
    State(state): State<AppState>,
    session: RequestSession,
) -> Result<impl IntoResponse, AnalyticsError> {
    let trends = state
        .analytics_service
        .funnel_trends(session.session())
        .await?;
    Ok(Json(trends))
}

/// Funnel analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funnel/summary", get(funnel_summary))
        .route("/funnel/trends", get(funnel_trends))
}
