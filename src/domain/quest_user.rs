//! Quest participant records as delivered by the quest service.
//!
//! The upstream payload groups tasks by quest kind. [`QuestState::tasks`]
//! flattens them into the tagged [`QuestTask`] variant so callers match on
//! the kind exhaustively instead of probing optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::message::parse_timestamp;

/// Subtype of a custom quest task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomSubtype {
    /// Swap on the campaign DEX.
    Dex,
    /// Any other custom subtype.
    #[default]
    #[serde(other)]
    Other,
}

/// A custom quest task with its subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomTask {
    /// Task subtype discriminator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtype: CustomSubtype,
    /// Whether the user finished the task.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// Completion record for quiz, video and social tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct TaskProgress {
    /// Whether the user finished the task.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// Per-user quest progress, grouped by quest kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestState {
    /// Custom tasks (DEX swaps and others).
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_tasks: Vec<CustomTask>,
    /// Quiz tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quiz_tasks: Vec<TaskProgress>,
    /// Video tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_tasks: Vec<TaskProgress>,
    /// Social tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_tasks: Vec<TaskProgress>,
}

/// Quest kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Custom task.
    Custom,
    /// Quiz task.
    Quiz,
    /// Video task.
    Video,
    /// Social task.
    Social,
}

/// A single quest task, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTask {
    /// Custom task carrying its subtype.
    Custom {
        /// Custom subtype.
        subtype: CustomSubtype,
        /// Completion flag.
        completed: bool,
    },
    /// Quiz task.
    Quiz {
        /// Completion flag.
        completed: bool,
    },
    /// Video task.
    Video {
        /// Completion flag.
        completed: bool,
    },
    /// Social task.
    Social {
        /// Completion flag.
        completed: bool,
    },
}

impl QuestTask {
    /// Returns the quest kind of this task.
    #[must_use]
    pub const fn kind(&self) -> QuestKind {
        match self {
            Self::Custom { .. } => QuestKind::Custom,
            Self::Quiz { .. } => QuestKind::Quiz,
            Self::Video { .. } => QuestKind::Video,
            Self::Social { .. } => QuestKind::Social,
        }
    }

    /// Returns `true` if the task is finished.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        match self {
            Self::Custom { completed, .. }
            | Self::Quiz { completed }
            | Self::Video { completed }
            | Self::Social { completed } => *completed,
        }
    }

    /// Returns `true` for a custom DEX swap task.
    #[must_use]
    pub const fn is_dex_swap(&self) -> bool {
        matches!(
            self,
            Self::Custom {
                subtype: CustomSubtype::Dex,
                ..
            }
        )
    }
}

impl QuestState {
    /// Iterates over every task of every kind.
    pub fn tasks(&self) -> impl Iterator<Item = QuestTask> + '_ {
        let custom = self.custom_tasks.iter().map(|t| QuestTask::Custom {
            subtype: t.subtype,
            completed: t.completed,
        });
        let quiz = self.quiz_tasks.iter().map(|t| QuestTask::Quiz {
            completed: t.completed,
        });
        let video = self.video_tasks.iter().map(|t| QuestTask::Video {
            completed: t.completed,
        });
        let social = self.social_tasks.iter().map(|t| QuestTask::Social {
            completed: t.completed,
        });
        custom.chain(quiz).chain(video).chain(social)
    }
}

/// A campaign participant with quest progress and wallet link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestUser {
    /// Upstream user identifier.
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    /// Linked wallet address, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    /// Quest progress.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quest_state: QuestState,
    /// Accumulated campaign points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: i64,
    /// Most recent activity.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl QuestUser {
    /// At least one DEX swap task exists, regardless of completion.
    #[must_use]
    pub fn has_started_dex_swap(&self) -> bool {
        self.quest_state.tasks().any(|t| t.is_dex_swap())
    }

    /// A non-blank wallet address is linked.
    #[must_use]
    pub fn has_connected_wallet(&self) -> bool {
        self.wallet_address
            .as_deref()
            .is_some_and(|addr| !addr.trim().is_empty())
    }

    /// A DEX swap task exists and is completed.
    #[must_use]
    pub fn has_completed_trade(&self) -> bool {
        self.quest_state
            .tasks()
            .any(|t| t.is_dex_swap() && t.is_completed())
    }
}

/// Reads an explicit `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any timestamp string understood by [`parse_timestamp`] or an
/// integer of epoch milliseconds; any other value becomes `None`.
fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => parse_timestamp(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(json: &str) -> QuestUser {
        let Ok(user) = serde_json::from_str::<QuestUser>(json) else {
            panic!("user should deserialize: {json}");
        };
        user
    }

    #[test]
    fn deserializes_full_record() {
        let user = parse(
            r#"{
                "id": "u1",
                "username": "alice",
                "walletAddress": "0xabc",
                "questState": {
                    "customTasks": [{"subtype": "dex", "completed": true}],
                    "quizTasks": [{"completed": true}],
                    "videoTasks": [],
                    "socialTasks": [{"completed": false}]
                },
                "points": 120,
                "lastActivityAt": "2025-02-01T12:30:00Z"
            }"#,
        );
        assert_eq!(user.points, 120);
        assert_eq!(user.quest_state.tasks().count(), 3);
        assert!(user.has_started_dex_swap());
        assert!(user.has_completed_trade());
        assert!(user.has_connected_wallet());
        assert!(user.last_activity_at.is_some());
    }

    #[test]
    fn unknown_subtype_maps_to_other() {
        let user = parse(
            r#"{"id":"u1","questState":{"customTasks":[{"subtype":"bridge","completed":true}]}}"#,
        );
        let Some(task) = user.quest_state.custom_tasks.first() else {
            panic!("expected one custom task");
        };
        assert_eq!(task.subtype, CustomSubtype::Other);
        assert!(!user.has_started_dex_swap());
        assert!(!user.has_completed_trade());
    }

    #[test]
    fn minimal_record_uses_defaults() {
        let user = parse(r#"{"id":"u1"}"#);
        assert_eq!(user.points, 0);
        assert!(user.quest_state.tasks().next().is_none());
        assert!(user.last_activity_at.is_none());
        assert!(!user.has_connected_wallet());
    }

    #[test]
    fn blank_wallet_is_not_connected() {
        let user = parse(r#"{"id":"u1","walletAddress":"   "}"#);
        assert!(!user.has_connected_wallet());
    }

    #[test]
    fn unparseable_activity_timestamp_is_dropped() {
        let user = parse(r#"{"id":"u1","lastActivityAt":"not a date"}"#);
        assert!(user.last_activity_at.is_none());
        let user = parse(r#"{"id":"u1","lastActivityAt":null}"#);
        assert!(user.last_activity_at.is_none());
    }

    #[test]
    fn explicit_nulls_fall_back_to_defaults() {
        let user = parse(r#"{"id":"u1","username":null,"points":null,"questState":null}"#);
        assert_eq!(user.username, "");
        assert_eq!(user.points, 0);
        assert_eq!(user.quest_state, QuestState::default());

        let user = parse(
            r#"{"id":"u1","questState":{"customTasks":null,"quizTasks":[{"completed":null}]}}"#,
        );
        assert!(user.quest_state.custom_tasks.is_empty());
        assert_eq!(user.quest_state.quiz_tasks, vec![TaskProgress { completed: false }]);

        let user = parse(
            r#"{"id":"u1","questState":{"customTasks":[{"subtype":null,"completed":true}]}}"#,
        );
        assert!(!user.has_completed_trade());
    }

    #[test]
    fn epoch_millis_activity_timestamp_is_accepted() {
        let user = parse(r#"{"id":"u1","lastActivityAt":1735689600000}"#);
        assert_eq!(
            user.last_activity_at.map(|at| at.to_rfc3339()).as_deref(),
            Some("2025-01-01T00:00:00+00:00")
        );
        let user = parse(r#"{"id":"u1","lastActivityAt":{"seconds":1}}"#);
        assert!(user.last_activity_at.is_none());
        let user = parse(r#"{"id":"u1","lastActivityAt":true}"#);
        assert!(user.last_activity_at.is_none());
    }

    #[test]
    fn one_odd_record_does_not_reject_the_batch() {
        let json = r#"[
            {"id":"u1","points":null},
            {"id":"u2","questState":null},
            {"id":"u3","questState":{"customTasks":null}},
            {"id":"u4","lastActivityAt":1735689600000},
            {"id":"u5","username":null}
        ]"#;
        let Ok(users) = serde_json::from_str::<Vec<QuestUser>>(json) else {
            panic!("lenient fields should keep the batch decodable");
        };
        assert_eq!(users.len(), 5);
    }

    #[test]
    fn started_but_not_completed() {
        let user = parse(r#"{"id":"u1","questState":{"customTasks":[{"subtype":"dex"}]}}"#);
        assert!(user.has_started_dex_swap());
        assert!(!user.has_completed_trade());
    }

    #[test]
    fn task_kinds_are_tagged() {
        let state = QuestState {
            custom_tasks: vec![CustomTask {
                subtype: CustomSubtype::Dex,
                completed: false,
            }],
            quiz_tasks: vec![TaskProgress { completed: true }],
            video_tasks: vec![TaskProgress::default()],
            social_tasks: vec![],
        };
        let kinds: Vec<QuestKind> = state.tasks().map(|t| t.kind()).collect();
        assert_eq!(kinds, vec![QuestKind::Custom, QuestKind::Quiz, QuestKind::Video]);
    }
}
