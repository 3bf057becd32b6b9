//! Conversation handlers: hierarchy tree and topic statistics.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::TreeQuery;
use crate::api::session::RequestSession;
use crate::app_state::AppState;
use crate::domain::{TopicAnalysis, TreeNode};
use crate::error::{AnalyticsError, ErrorResponse};

/// `GET /conversations/tree` — Build the conversation hierarchy.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidGroupMode`] for an unknown `mode`, or
/// a session/upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/conversations/tree",
    tag = "Conversations",
    summary = "Conversation tree",
    description = "Groups all messages into a tree. `by_topic` yields Topic → Conversation → Message; `by_user` yields User → Topic → Message. Groups are ordered by message count, leaves chronologically.",
    params(TreeQuery),
    responses(
        (status = 200, description = "Root nodes of the tree", body = Vec<TreeNode>),
        (status = 400, description = "Unknown grouping mode", body = ErrorResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn conversation_tree(
    State(state): State<AppState>,
    session: RequestSession,
    Query(query): Query<TreeQuery>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let mode = query.group_mode()?;
    let tree = state
        .analytics_service
        .conversation_tree(mode, session.session())
        .await?;
    Ok(Json(tree))
}

/// `GET /conversations/topics` — Statistics for every topic.
///
/// # Errors
///
/// Returns a session or upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/conversations/topics",
    tag = "Conversations",
    summary = "Topic analysis",
    description = "Per-topic message and user counts, sentiment distribution, timespan, and keywords, ordered by message count.",
    responses(
        (status = 200, description = "One entry per topic", body = Vec<TopicAnalysis>),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn list_topics(
    State(state): State<AppState>,
    session: RequestSession,
) -> Result<impl IntoResponse, AnalyticsError> {
    let topics = state.analytics_service.topics(session.session()).await?;
    Ok(Json(topics))
}

/// `GET /conversations/topics/{topic}` — Statistics for one topic.
///
/// # Errors
///
/// Returns [`AnalyticsError::TopicNotFound`] if no message carries the
/// label, or a session/upstream error.
#[utoipa::path(
    get,
    path = "/api/v1/conversations/topics/{topic}",
    tag = "Conversations",
    summary = "Topic drill-down",
    description = "Statistics and chronologically ordered messages for a single topic.",
    params(
        ("topic" = String, Path, description = "Topic label (exact match)"),
    ),
    responses(
        (status = 200, description = "Topic statistics", body = TopicAnalysis),
        (status = 404, description = "Topic not found", body = ErrorResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_topic(
    State(state): State<AppState>,
    session: RequestSession,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, AnalyticsError> {
    let analysis = state
        .analytics_service
        .topic(&topic, session.session())
        .await?;
    Ok(Json(analysis))
}

/// Conversation analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/conversations/tree", get(conversation_tree))
        .route("/conversations/topics", get(list_topics))
        .route("/conversations/topics/{topic}", get(get_topic))
}
