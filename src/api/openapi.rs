//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{FunnelStageInfo, HealthResponse};
use crate::api::handlers::{conversations, funnel, system, users};
use crate::domain::{
    ConversionRates, FunnelStage, FunnelSummary, FunnelTrends, GroupMode, Message, NodeKind,
    Sentiment, StageCounts, TaskTally, Timespan, TopicAnalysis, TreeNode, TrendPoint,
    UserActivity,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the served OpenAPI JSON.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "campaign-analytics",
        description = "Conversation and quest-funnel analytics for campaign dashboards."
    ),
    paths(
        system::health_handler,
        system::funnel_stages_handler,
        conversations::conversation_tree,
        conversations::list_topics,
        conversations::get_topic,
        funnel::funnel_summary,
        funnel::funnel_trends,
        users::user_activity,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        HealthResponse,
        FunnelStageInfo,
        TreeNode,
        NodeKind,
        GroupMode,
        Message,
        Sentiment,
        TopicAnalysis,
        Timespan,
        FunnelStage,
        StageCounts,
        ConversionRates,
        FunnelSummary,
        TrendPoint,
        FunnelTrends,
        TaskTally,
        UserActivity,
    )),
    tags(
        (name = "System", description = "Health and static catalogs"),
        (name = "Conversations", description = "Conversation trees and topic statistics"),
        (name = "Funnel", description = "Quest funnel counts and trends"),
        (name = "Users", description = "Per-user activity"),
    )
)]
pub struct ApiDoc;
