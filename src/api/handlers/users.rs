//! User activity ranking handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ActivityQuery;
use crate::api::session::RequestSession;
use crate::app_state::AppState;
use crate::domain::UserActivity;
use crate::error::{AnalyticsError, ErrorResponse};

/// `GET /users/activity` — Users ranked by points.
///
/// # Errors
///
/// Returns a session or upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/users/activity",
    tag = "Users",
    summary = "User activity ranking",
    description = "Users ordered by points with per-kind task tallies and satisfied funnel stages. `limit` is clamped to 1..=100.",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Ranked users", body = Vec<UserActivity>),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn user_activity(
    State(state): State<AppState>,
    session: RequestSession,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let rows = state
        .analytics_service
        .user_activity(query.limit(), session.session())
        .await?;
    Ok(Json(rows))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/activity", get(user_activity))
}
