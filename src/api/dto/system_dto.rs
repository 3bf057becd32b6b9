//! Response bodies for the root-level system endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FunnelStage;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process is serving.
    pub status: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Funnel stage catalog entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct FunnelStageInfo {
    /// Stage identifier.
    pub stage: FunnelStage,
    /// Key of the stage's trend series.
    pub series: &'static str,
    /// Membership predicate in plain words.
    pub description: &'static str,
}

impl From<FunnelStage> for FunnelStageInfo {
    fn from(stage: FunnelStage) -> Self {
        let series = match stage {
            FunnelStage::Started => "started_dex_swap",
            FunnelStage::Connected => "connected_cere_wallet",
            FunnelStage::Completed => "completed_trade",
        };
        Self {
            stage,
            series,
            description: stage.description(),
        }
    }
}
