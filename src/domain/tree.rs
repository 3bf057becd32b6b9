//! Generic hierarchy node rendered by the dashboard's collapsible tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AnalyticsError;

/// Level of a node within a conversation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a by-user tree.
    User,
    /// Topic grouping.
    Topic,
    /// Conversation thread grouping.
    Conversation,
    /// Leaf holding one message.
    Message,
}

/// How messages are grouped when building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// Topic → Conversation → Message.
    #[default]
    ByTopic,
    /// User → Topic → Message.
    ByUser,
}

impl GroupMode {
    /// Returns the mode as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ByTopic => "by_topic",
            Self::ByUser => "by_user",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMode {
    type Err = AnalyticsError;

    /// Accepts `by_topic`/`byTopic`/`topic` and `by_user`/`byUser`/`user`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_topic" | "byTopic" | "topic" => Ok(Self::ByTopic),
            "by_user" | "byUser" | "user" => Ok(Self::ByUser),
            other => Err(AnalyticsError::InvalidGroupMode(other.to_string())),
        }
    }
}

/// A node in a conversation tree.
///
/// Non-leaf nodes carry `count` (descendant messages) and `children`;
/// leaves carry the original message in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TreeNode {
    /// Path-derived identifier, stable across recomputation.
    pub id: String,
    /// Level of the node.
    pub kind: NodeKind,
    /// Display title.
    pub title: String,
    /// Count summary or timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Number of descendant messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Child nodes, ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<TreeNode>>,
    /// Leaf payload (the message record).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Value>,
}

impl TreeNode {
    /// Returns the children, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Counts the leaf nodes beneath (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => children.iter().map(Self::leaf_count).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn group_mode_parses_aliases() {
        assert_eq!("by_topic".parse::<GroupMode>().ok(), Some(GroupMode::ByTopic));
        assert_eq!("byUser".parse::<GroupMode>().ok(), Some(GroupMode::ByUser));
        assert_eq!("user".parse::<GroupMode>().ok(), Some(GroupMode::ByUser));
    }

    #[test]
    fn group_mode_rejects_unknown() {
        let result = "by_sentiment".parse::<GroupMode>();
        let Err(AnalyticsError::InvalidGroupMode(raw)) = result else {
            panic!("expected InvalidGroupMode");
        };
        assert_eq!(raw, "by_sentiment");
    }

    #[test]
    fn leaf_node_serializes_without_empty_fields() {
        let node = TreeNode {
            id: "m1".to_string(),
            kind: NodeKind::Message,
            title: "alice".to_string(),
            subtitle: None,
            count: None,
            children: None,
            payload: None,
        };
        let json = serde_json::to_string(&node).unwrap_or_default();
        assert_eq!(json, r#"{"id":"m1","kind":"message","title":"alice"}"#);
        assert_eq!(node.leaf_count(), 1);
        assert!(node.children().is_empty());
    }
}
