//! Chat message records as delivered by the conversation service.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Sentiment label attached to a message by the upstream classifier.
///
/// Messages without a label are counted as [`Sentiment::Neutral`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive tone.
    Positive,
    /// Negative tone.
    Negative,
    /// Neutral or unclassified tone.
    Neutral,
}

impl Sentiment {
    /// All sentiment labels, in the order used to break ties when picking
    /// a dominant sentiment.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Returns the label as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a classifier label, ignoring case and surrounding space.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message.
///
/// Mirrors the upstream JSON contract (camelCase keys). Messages are
/// immutable once fetched; every analysis reads them by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Upstream message identifier.
    pub id: String,
    /// Author handle.
    pub user: String,
    /// Message text.
    pub message: String,
    /// Discussion topic label.
    pub topic: String,
    /// ISO-8601 timestamp as sent by the upstream service.
    pub timestamp: String,
    /// Classifier sentiment, if any. Unknown labels are dropped.
    #[serde(
        default,
        deserialize_with = "deserialize_sentiment",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<Sentiment>,
    /// Thread identifier linking messages of one exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl Message {
    /// Sentiment with the neutral fallback applied.
    #[must_use]
    pub fn effective_sentiment(&self) -> Sentiment {
        self.sentiment.unwrap_or(Sentiment::Neutral)
    }

    /// Parsed timestamp, or `None` when the raw string is not a
    /// recognised ISO-8601 form.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

fn deserialize_sentiment<'de, D>(deserializer: D) -> Result<Option<Sentiment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(label)) => Sentiment::from_label(&label),
        _ => None,
    })
}

/// Parses the timestamp forms the conversation service is known to emit.
///
/// Accepts RFC 3339, minute-precision `YYYY-MM-DDTHH:MMZ`, naive
/// date-times (interpreted as UTC) and bare dates (midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Chronological ordering of two messages.
///
/// Parseable timestamps come first in time order; unparseable ones sort
/// after them by raw string. Callers use a stable sort so equal keys keep
/// their input order.
#[must_use]
pub fn chronological(a: &Message, b: &Message) -> Ordering {
    match (a.parsed_timestamp(), b.parsed_timestamp()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.timestamp.cmp(&b.timestamp),
    }
}
