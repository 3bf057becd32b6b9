//! Per-topic analytic summary.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::message::{Message, Sentiment};

/// First and last message timestamps of a topic, as sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Timespan {
    /// Earliest timestamp.
    pub start: String,
    /// Latest timestamp.
    pub end: String,
}

/// Statistics for one discussion topic.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopicAnalysis {
    /// Topic label.
    pub topic: String,
    /// Number of messages in the topic.
    pub message_count: usize,
    /// Number of distinct authors.
    pub unique_users: usize,
    /// Most frequent sentiment.
    pub dominant_sentiment: Sentiment,
    /// Message count per sentiment; all three labels are always present.
    #[schema(value_type = Object)]
    pub sentiment_distribution: BTreeMap<Sentiment, usize>,
    /// Earliest and latest message.
    pub timespan: Timespan,
    /// Up to five most frequent keywords.
    pub keywords: Vec<String>,
    /// The topic's messages in chronological order.
    pub conversations: Vec<Message>,
}
