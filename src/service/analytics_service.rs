//! Analytics service: fetches records and runs the pure analyzers.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    FunnelSummary, FunnelTrends, GroupMode, Message, QuestUser, Session, TopicAnalysis, TreeNode,
    UserActivity, conversation_analyzer, funnel_aggregator,
};
use crate::error::AnalyticsError;
use crate::upstream::DataSource;

/// Orchestration layer for all analytics reads.
///
/// Stateless coordinator: owns a reference to a [`DataSource`]. Every
/// method follows the pattern: validate session → fetch → transform →
/// return view-model. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    source: Arc<dyn DataSource>,
}

impl AnalyticsService {
    /// Creates a new `AnalyticsService`.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Builds the conversation tree in the given grouping mode.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the session has expired or the
    /// fetch fails.
    pub async fn conversation_tree(
        &self,
        mode: GroupMode,
        session: Option<&Session>,
    ) -> Result<Vec<TreeNode>, AnalyticsError> {
        let messages = self.messages(session).await?;
        let tree = conversation_analyzer::build_tree(&messages, mode);
        tracing::info!(
            %mode,
            messages = messages.len(),
            roots = tree.len(),
            "conversation tree built"
        );
        Ok(tree)
    }

    /// Computes statistics for every topic.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the session has expired or the
    /// fetch fails.
    pub async fn topics(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<TopicAnalysis>, AnalyticsError> {
        let messages = self.messages(session).await?;
        let topics = conversation_analyzer::analyze_topics(&messages);
        tracing::info!(messages = messages.len(), topics = topics.len(), "topics analyzed");
        Ok(topics)
    }

    /// Computes statistics for one topic.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::TopicNotFound`] if no message carries the
    /// label, or another [`AnalyticsError`] on session or fetch failure.
    pub async fn topic(
        &self,
        topic: &str,
        session: Option<&Session>,
    ) -> Result<TopicAnalysis, AnalyticsError> {
        let messages = self.messages(session).await?;
        conversation_analyzer::analyze_topic(&messages, topic)
            .ok_or_else(|| AnalyticsError::TopicNotFound(topic.to_string()))
    }

    /// Stage counts and conversion rates.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the session has expired or the
    /// fetch fails.
    pub async fn funnel_summary(
        &self,
        session: Option<&Session>,
    ) -> Result<FunnelSummary, AnalyticsError> {
        let users = self.quest_users(session).await?;
        let summary = funnel_aggregator::summarize(&users);
        tracing::info!(
            users = summary.total_users,
            started = summary.counts.started,
            connected = summary.counts.connected,
            completed = summary.counts.completed,
            "funnel summarized"
        );
        Ok(summary)
    }

    /// Cumulative daily trend series per stage.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the session has expired or the
    /// fetch fails.
    pub async fn funnel_trends(
        &self,
        session: Option<&Session>,
    ) -> Result<FunnelTrends, AnalyticsError> {
        let users = self.quest_users(session).await?;
        let trends = funnel_aggregator::build_trends(&users);
        tracing::info!(
            users = users.len(),
            days = trends.started_dex_swap.len(),
            "funnel trends built"
        );
        Ok(trends)
    }

    /// Users ranked by points with task tallies.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the session has expired or the
    /// fetch fails.
    pub async fn user_activity(
        &self,
        limit: usize,
        session: Option<&Session>,
    ) -> Result<Vec<UserActivity>, AnalyticsError> {
        let users = self.quest_users(session).await?;
        Ok(funnel_aggregator::user_activity(&users, limit))
    }

    async fn messages(&self, session: Option<&Session>) -> Result<Vec<Message>, AnalyticsError> {
        check_session(session)?;
        self.source.fetch_messages(session).await
    }

    async fn quest_users(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<QuestUser>, AnalyticsError> {
        check_session(session)?;
        self.source.fetch_quest_users(session).await
    }
}

fn check_session(session: Option<&Session>) -> Result<(), AnalyticsError> {
    match session {
        Some(s) => s.ensure_valid(Utc::now()),
        None => Ok(()),
    }
}
