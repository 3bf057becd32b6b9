//! campaign-analytics server entry point.
//!
//! Starts the Axum HTTP server with the REST analytics endpoints.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use campaign_analytics::api;
use campaign_analytics::app_state::AppState;
use campaign_analytics::config::AnalyticsConfig;
use campaign_analytics::service::AnalyticsService;
use campaign_analytics::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AnalyticsConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        conversations = %config.conversations_url,
        quest_users = %config.quest_users_url,
        require_session = config.require_session,
        "starting campaign-analytics"
    );

    // Build upstream + service layer
    let client = UpstreamClient::from_config(&config)?;
    let analytics_service = Arc::new(AnalyticsService::new(Arc::new(client)));

    // Build application state
    let app_state = AppState {
        analytics_service,
        require_session: config.require_session,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
