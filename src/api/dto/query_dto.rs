//! Query string parameters for analytics endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::GroupMode;
use crate::domain::funnel_aggregator::DEFAULT_ACTIVITY_LIMIT;
use crate::error::AnalyticsError;

/// Query parameters for `GET /conversations/tree`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TreeQuery {
    /// Grouping mode: `by_topic` (default) or `by_user`.
    pub mode: Option<String>,
}

impl TreeQuery {
    /// Resolves the grouping mode, defaulting to [`GroupMode::ByTopic`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidGroupMode`] for unknown values.
    pub fn group_mode(&self) -> Result<GroupMode, AnalyticsError> {
        match self.mode.as_deref().map(str::trim) {
            None | Some("") => Ok(GroupMode::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// Query parameters for `GET /users/activity`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Number of ranked users to return (1-100). Defaults to 20.
    pub limit: Option<usize>,
}

impl ActivityQuery {
    /// Requested limit or the default. Clamping happens in the aggregator.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_mode_defaults_to_topic() {
        assert_eq!(TreeQuery::default().group_mode().ok(), Some(GroupMode::ByTopic));
        let blank = TreeQuery {
            mode: Some("  ".to_string()),
        };
        assert_eq!(blank.group_mode().ok(), Some(GroupMode::ByTopic));
    }

    #[test]
    fn explicit_mode_is_parsed() {
        let query = TreeQuery {
            mode: Some("by_user".to_string()),
        };
        assert_eq!(query.group_mode().ok(), Some(GroupMode::ByUser));

        let bad = TreeQuery {
            mode: Some("by_day".to_string()),
        };
        assert!(matches!(bad.group_mode(), Err(AnalyticsError::InvalidGroupMode(_))));
    }

    #[test]
    fn activity_limit_defaults() {
        assert_eq!(ActivityQuery::default().limit(), DEFAULT_ACTIVITY_LIMIT);
        assert_eq!(ActivityQuery { limit: Some(5) }.limit(), 5);
    }
}
