//! HTTP client for the upstream conversation and quest services.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::envelope::unwrap_records_from_slice;
use super::source::DataSource;
use crate::config::AnalyticsConfig;
use crate::domain::{Message, QuestUser, Session};
use crate::error::AnalyticsError;

/// Header carrying the static service API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// [`DataSource`] backed by the upstream REST services.
///
/// One `reqwest::Client` is shared across requests; the configured timeout
/// applies to each call.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    conversations_url: String,
    quest_users_url: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    /// Builds a client from the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Internal`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(concat!("campaign-analytics/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalyticsError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            http,
            conversations_url: config.conversations_url.clone(),
            quest_users_url: config.quest_users_url.clone(),
            api_key: config.upstream_api_key.clone(),
        })
    }

    async fn fetch_records<T: DeserializeOwned>(
        &self,
        url: &str,
        session: Option<&Session>,
    ) -> Result<Vec<T>, AnalyticsError> {
        let mut request = self.http.get(url);
        if let Some(session) = session {
            request = request.bearer_auth(session.token());
        }
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let started = std::time::Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "upstream request failed");
            AnalyticsError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, %status, "upstream returned error status");
            return Err(AnalyticsError::Upstream(format!("{url} returned {status}")));
        }

        let body = response.bytes().await?;
        let records = unwrap_records_from_slice(&body)?;
        tracing::debug!(
            url,
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream fetch complete"
        );
        Ok(records)
    }
}

#[async_trait]
impl DataSource for UpstreamClient {
    async fn fetch_messages(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<Message>, AnalyticsError> {
        self.fetch_records(&self.conversations_url, session).await
    }

    async fn fetch_quest_users(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<QuestUser>, AnalyticsError> {
        self.fetch_records(&self.quest_users_url, session).await
    }
}
