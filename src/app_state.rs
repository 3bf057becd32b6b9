//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::AnalyticsService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Analytics service for all reads.
    pub analytics_service: Arc<AnalyticsService>,
    /// Reject `/api/v1` requests without a bearer session.
    pub require_session: bool,
}
