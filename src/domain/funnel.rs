//! Funnel stages, counts, conversion rates and trend series.

use std::ops::AddAssign;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::quest_user::{QuestKind, QuestUser};

/// A named user-progress checkpoint.
///
/// Stages are independent membership tests, not mutually exclusive steps:
/// one user may satisfy several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    /// Has at least one DEX swap task.
    Started,
    /// Has linked a wallet.
    Connected,
    /// Has completed a DEX swap task.
    Completed,
}

impl FunnelStage {
    /// All stages in funnel order.
    pub const ALL: [Self; 3] = [Self::Started, Self::Connected, Self::Completed];

    /// Returns `true` if the user satisfies this stage's predicate.
    #[must_use]
    pub fn matches(&self, user: &QuestUser) -> bool {
        match self {
            Self::Started => user.has_started_dex_swap(),
            Self::Connected => user.has_connected_wallet(),
            Self::Completed => user.has_completed_trade(),
        }
    }

    /// Returns the stage as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Connected => "connected",
            Self::Completed => "completed",
        }
    }

    /// Human-readable description of the predicate.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Started => "has at least one DEX swap task, completed or not",
            Self::Connected => "has a non-empty wallet address",
            Self::Completed => "has a completed DEX swap task",
        }
    }
}

/// Number of users satisfying each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct StageCounts {
    /// Users with a DEX swap task.
    pub started: u64,
    /// Users with a linked wallet.
    pub connected: u64,
    /// Users with a completed DEX swap.
    pub completed: u64,
}

impl StageCounts {
    /// Returns the count for one stage.
    #[must_use]
    pub const fn get(&self, stage: FunnelStage) -> u64 {
        match stage {
            FunnelStage::Started => self.started,
            FunnelStage::Connected => self.connected,
            FunnelStage::Completed => self.completed,
        }
    }

    /// Increments the count for one stage.
    pub fn increment(&mut self, stage: FunnelStage) {
        let slot = match stage {
            FunnelStage::Started => &mut self.started,
            FunnelStage::Connected => &mut self.connected,
            FunnelStage::Completed => &mut self.completed,
        };
        *slot = slot.saturating_add(1);
    }
}

impl AddAssign for StageCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.started = self.started.saturating_add(rhs.started);
        self.connected = self.connected.saturating_add(rhs.connected);
        self.completed = self.completed.saturating_add(rhs.completed);
    }
}

/// Stage-to-stage conversion percentages, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct ConversionRates {
    /// `connected / started * 100`.
    pub started_to_connected: f64,
    /// `completed / started * 100`.
    pub started_to_completed: f64,
}

/// Headline funnel figures for KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct FunnelSummary {
    /// Number of users considered.
    pub total_users: u64,
    /// Users per stage.
    pub counts: StageCounts,
    /// Conversion percentages derived from `counts`.
    pub rates: ConversionRates,
}

/// One point of a cumulative trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrendPoint {
    /// Calendar date (UTC), serialized as `YYYY-MM-DD`.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Cumulative number of users up to and including `date`.
    pub value: u64,
}

/// Cumulative daily series for each funnel stage.
///
/// All three series share the same dates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct FunnelTrends {
    /// Series for [`FunnelStage::Started`].
    pub started_dex_swap: Vec<TrendPoint>,
    /// Series for [`FunnelStage::Connected`].
    pub connected_cere_wallet: Vec<TrendPoint>,
    /// Series for [`FunnelStage::Completed`].
    pub completed_trade: Vec<TrendPoint>,
}

impl FunnelTrends {
    /// Returns the series for one stage.
    #[must_use]
    pub fn series(&self, stage: FunnelStage) -> &[TrendPoint] {
        match stage {
            FunnelStage::Started => &self.started_dex_swap,
            FunnelStage::Connected => &self.connected_cere_wallet,
            FunnelStage::Completed => &self.completed_trade,
        }
    }

    pub(crate) fn series_mut(&mut self, stage: FunnelStage) -> &mut Vec<TrendPoint> {
        match stage {
            FunnelStage::Started => &mut self.started_dex_swap,
            FunnelStage::Connected => &mut self.connected_cere_wallet,
            FunnelStage::Completed => &mut self.completed_trade,
        }
    }
}

/// Completed and total task counts for one quest kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct TaskTally {
    /// Finished tasks.
    pub completed: usize,
    /// All tasks.
    pub total: usize,
}

/// Activity summary for one user, ranked by points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserActivity {
    /// 1-based rank by points.
    pub rank: usize,
    /// Upstream user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Accumulated points.
    pub points: i64,
    /// Stages the user satisfies, in funnel order.
    pub stages: Vec<FunnelStage>,
    /// Custom task tally.
    pub custom: TaskTally,
    /// Quiz task tally.
    pub quiz: TaskTally,
    /// Video task tally.
    pub video: TaskTally,
    /// Social task tally.
    pub social: TaskTally,
    /// Most recent activity (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<String>,
}

impl UserActivity {
    pub(crate) fn tally_mut(&mut self, kind: QuestKind) -> &mut TaskTally {
        match kind {
            QuestKind::Custom => &mut self.custom,
            QuestKind::Quiz => &mut self.quiz,
            QuestKind::Video => &mut self.video,
            QuestKind::Social => &mut self.social,
        }
    }
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert!((round_one_decimal(66.666) - 66.7).abs() < f64::EPSILON);
        assert!((round_one_decimal(50.0) - 50.0).abs() < f64::EPSILON);
        assert!((round_one_decimal(33.34) - 33.3).abs() < f64::EPSILON);
    }

    #[test]
    fn stage_counts_accessors() {
        let mut counts = StageCounts::default();
        counts.increment(FunnelStage::Started);
        counts.increment(FunnelStage::Started);
        counts.increment(FunnelStage::Completed);
        assert_eq!(counts.get(FunnelStage::Started), 2);
        assert_eq!(counts.get(FunnelStage::Connected), 0);
        assert_eq!(counts.get(FunnelStage::Completed), 1);
    }

    #[test]
    fn trend_point_serializes_plain_date() {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 1, 3) else {
            panic!("valid date");
        };
        let json = serde_json::to_string(&TrendPoint { date, value: 4 }).unwrap_or_default();
        assert_eq!(json, r#"{"date":"2025-01-03","value":4}"#);
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&FunnelStage::ALL).unwrap_or_default();
        assert_eq!(json, r#"["started","connected","completed"]"#);
    }
}
