//! Data source seam between the service layer and upstream data.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::{Message, QuestUser, Session};
use crate::error::AnalyticsError;

/// Supplies the raw record arrays the analyzers consume.
///
/// Implementations return already-unwrapped arrays (possibly empty) and
/// surface fetch failures as [`AnalyticsError`]. They never retry.
#[async_trait]
pub trait DataSource: Send + Sync + Debug {
    /// Fetches conversation messages.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the fetch or decoding fails.
    async fn fetch_messages(&self, session: Option<&Session>)
    -> Result<Vec<Message>, AnalyticsError>;

    /// Fetches quest participants.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the fetch or decoding fails.
    async fn fetch_quest_users(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<QuestUser>, AnalyticsError>;
}

/// In-memory source serving fixed records.
///
/// Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    messages: Vec<Message>,
    quest_users: Vec<QuestUser>,
}

impl StaticDataSource {
    /// Creates a source serving the given records.
    #[must_use]
    pub fn new(messages: Vec<Message>, quest_users: Vec<QuestUser>) -> Self {
        Self {
            messages,
            quest_users,
        }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch_messages(
        &self,
        _session: Option<&Session>,
    ) -> Result<Vec<Message>, AnalyticsError> {
        Ok(self.messages.clone())
    }

    async fn fetch_quest_users(
        &self,
        _session: Option<&Session>,
    ) -> Result<Vec<QuestUser>, AnalyticsError> {
        Ok(self.quest_users.clone())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn static_source_serves_its_records() {
        let source = StaticDataSource::default();
        let Ok(messages) = tokio_test::block_on(source.fetch_messages(None)) else {
            panic!("static source never fails");
        };
        assert!(messages.is_empty());
        let Ok(users) = tokio_test::block_on(source.fetch_quest_users(None)) else {
            panic!("static source never fails");
        };
        assert!(users.is_empty());
    }
}
