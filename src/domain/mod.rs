//! Domain layer: record types, derived view-models, and the pure
//! transformations between them.
//!
//! Nothing in this module performs I/O. The conversation analyzer and the
//! funnel aggregator recompute their outputs from scratch on every call.

pub mod conversation_analyzer;
pub mod funnel;
pub mod funnel_aggregator;
pub mod keywords;
pub mod message;
pub mod quest_user;
pub mod session;
pub mod topic;
pub mod tree;

pub use funnel::{
    ConversionRates, FunnelStage, FunnelSummary, FunnelTrends, StageCounts, TaskTally,
    TrendPoint, UserActivity,
};
pub use message::{Message, Sentiment};
pub use quest_user::{QuestKind, QuestTask, QuestUser};
pub use session::Session;
pub use topic::{Timespan, TopicAnalysis};
pub use tree::{GroupMode, NodeKind, TreeNode};
