//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Analytics endpoints are mounted under `/api/v1`; health, catalog and
//! OpenAPI routes live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod session;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use openapi::{ApiDoc, OPENAPI_JSON_PATH};

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .merge(docs_routes())
}

#[cfg(feature = "swagger-ui")]
fn docs_routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(
        OPENAPI_JSON_PATH,
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{Message, QuestUser, Sentiment};
    use crate::service::AnalyticsService;
    use crate::upstream::StaticDataSource;

    fn message(id: &str, user: &str, topic: &str, ts: &str) -> Message {
        Message {
            id: id.to_string(),
            user: user.to_string(),
            message: "swap fees look great".to_string(),
            topic: topic.to_string(),
            timestamp: ts.to_string(),
            sentiment: Some(Sentiment::Positive),
            conversation_id: Some("c1".to_string()),
        }
    }

    fn app(require_session: bool) -> Router {
        let messages = vec![
            message("m1", "alice", "A", "2025-01-01T10:00:00Z"),
            message("m2", "bob", "A", "2025-01-01T09:00:00Z"),
            message("m3", "alice", "B", "2025-01-02T10:00:00Z"),
        ];
        let users: Vec<QuestUser> = [
            r#"{"id":"u1","points":10,"questState":{"customTasks":[{"subtype":"dex","completed":true}]},"walletAddress":"0x1"}"#,
            r#"{"id":"u2","points":30,"questState":{"customTasks":[{"subtype":"dex","completed":false}]}}"#,
        ]
        .iter()
        .filter_map(|raw| serde_json::from_str(raw).ok())
        .collect();
        let service = AnalyticsService::new(Arc::new(StaticDataSource::new(messages, users)));
        let state = AppState {
            analytics_service: Arc::new(service),
            require_session,
        };
        build_router().with_state(state)
    }

    async fn get_json(app: Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let Ok(request) = builder.body(Body::empty()) else {
            panic!("request should build");
        };
        let Ok(response) = app.oneshot(request).await;
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get_json(app(false), "/health", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn stage_catalog_lists_all_stages() {
        let (status, body) = get_json(app(false), "/config/funnel-stages", &[]).await;
        assert_eq!(status, StatusCode::OK);
        let Some(stages) = body.as_array() else {
            panic!("expected array");
        };
        let names: Vec<&str> = stages.iter().filter_map(|s| s["stage"].as_str()).collect();
        assert_eq!(names, vec!["started", "connected", "completed"]);
    }

    #[tokio::test]
    async fn tree_defaults_to_topic_grouping() {
        let (status, body) = get_json(app(false), "/api/v1/conversations/tree", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "topic:A");
        assert_eq!(body[0]["count"], 2);

        let (status, body) =
            get_json(app(false), "/api/v1/conversations/tree?mode=by_user", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "user:alice");
        assert_eq!(body[0]["kind"], "user");
    }

    #[tokio::test]
    async fn unknown_mode_is_bad_request() {
        let (status, body) =
            get_json(app(false), "/api/v1/conversations/tree?mode=by_day", &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);
    }

    #[tokio::test]
    async fn topic_drill_down_and_not_found() {
        let (status, body) = get_json(app(false), "/api/v1/conversations/topics/A", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message_count"], 2);
        assert_eq!(body["conversations"][0]["id"], "m2");

        let (status, body) = get_json(app(false), "/api/v1/conversations/topics/Z", &[]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn funnel_endpoints_serialize_view_models() {
        let (status, body) = get_json(app(false), "/api/v1/funnel/summary", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counts"]["started"], 2);
        assert_eq!(body["counts"]["completed"], 1);
        assert_eq!(body["rates"]["started_to_completed"], 50.0);

        let (status, body) = get_json(app(false), "/api/v1/funnel/trends", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["started_dex_swap"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn activity_is_ranked_by_points() {
        let (status, body) = get_json(app(false), "/api/v1/users/activity?limit=1", &[]).await;
        assert_eq!(status, StatusCode::OK);
        let Some(rows) = body.as_array() else {
            panic!("expected array");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(body[0]["user_id"], "u2");
    }

    #[tokio::test]
    async fn required_session_is_enforced() {
        let (status, body) = get_json(app(true), "/api/v1/conversations/topics", &[]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 1101);

        let (status, _) = get_json(
            app(true),
            "/api/v1/conversations/topics",
            &[("authorization", "Bearer tok")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get_json(app(true), "/health", &[]).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn expired_session_is_unauthorized() {
        let (status, body) = get_json(
            app(false),
            "/api/v1/funnel/summary",
            &[
                ("authorization", "Bearer tok"),
                ("x-session-expires-at", "2000-01-01T00:00:00Z"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 1102);

        let (status, body) = get_json(
            app(false),
            "/api/v1/funnel/summary",
            &[
                ("authorization", "Bearer tok"),
                ("x-session-expires-at", "tomorrow"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get_json(app(false), OPENAPI_JSON_PATH, &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/funnel/trends"].is_object());
    }
}
