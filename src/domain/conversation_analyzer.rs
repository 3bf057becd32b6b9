//! Conversation tree building and per-topic statistics.
//!
//! Both operations are pure: they read a message slice and return freshly
//! built view-models. Group order at every level is descending message
//! count with first appearance in the input as the tie-break, so output
//! never depends on hash iteration order.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::keywords::{MAX_KEYWORDS, extract_keywords};
use super::message::{Message, Sentiment, chronological};
use super::topic::{Timespan, TopicAnalysis};
use super::tree::{GroupMode, NodeKind, TreeNode};

/// Bucket for messages without a conversation id.
pub const UNKNOWN_CONVERSATION: &str = "unknown";

/// Builds a three-level tree from a flat message list.
///
/// - [`GroupMode::ByTopic`]: Topic → Conversation → Message
/// - [`GroupMode::ByUser`]: User → Topic → Message
///
/// Leaf messages are in chronological order. An empty input yields an
/// empty forest.
#[must_use]
pub fn build_tree(messages: &[Message], mode: GroupMode) -> Vec<TreeNode> {
    match mode {
        GroupMode::ByTopic => build_topic_tree(messages),
        GroupMode::ByUser => build_user_tree(messages),
    }
}

/// Computes statistics for every topic, largest topic first.
#[must_use]
pub fn analyze_topics(messages: &[Message]) -> Vec<TopicAnalysis> {
    group_ordered(messages, |m| m.topic.as_str())
        .into_iter()
        .map(|(topic, group)| summarize_topic(topic, &group))
        .collect()
}

/// Computes statistics for a single topic, or `None` if no message
/// carries that label.
#[must_use]
pub fn analyze_topic(messages: &[Message], topic: &str) -> Option<TopicAnalysis> {
    let group: Vec<&Message> = messages.iter().filter(|m| m.topic == topic).collect();
    if group.is_empty() {
        return None;
    }
    Some(summarize_topic(topic, &group))
}

fn build_topic_tree(messages: &[Message]) -> Vec<TreeNode> {
    group_ordered(messages, |m| m.topic.as_str())
        .into_iter()
        .map(|(topic, group)| {
            let topic_id = format!("topic:{topic}");
            let conversations = group_ordered(group.iter().copied(), |m| {
                m.conversation_id.as_deref().unwrap_or(UNKNOWN_CONVERSATION)
            });
            let conversation_count = conversations.len();

            let children: Vec<TreeNode> = conversations
                .into_iter()
                .map(|(conversation, thread)| {
                    let count = thread.len();
                    branch(
                        format!("{topic_id}/conversation:{conversation}"),
                        NodeKind::Conversation,
                        conversation,
                        plural(count, "message"),
                        count,
                        leaves(thread),
                    )
                })
                .collect();

            let count = group.len();
            branch(
                topic_id,
                NodeKind::Topic,
                topic,
                format!(
                    "{} across {}",
                    plural(count, "message"),
                    plural(conversation_count, "conversation")
                ),
                count,
                children,
            )
        })
        .collect()
}

fn build_user_tree(messages: &[Message]) -> Vec<TreeNode> {
    group_ordered(messages, |m| m.user.as_str())
        .into_iter()
        .map(|(user, authored)| {
            let user_id = format!("user:{user}");
            let topics = group_ordered(authored.iter().copied(), |m| m.topic.as_str());
            let topic_count = topics.len();

            let children: Vec<TreeNode> = topics
                .into_iter()
                .map(|(topic, group)| {
                    let count = group.len();
                    branch(
                        format!("{user_id}/topic:{topic}"),
                        NodeKind::Topic,
                        topic,
                        plural(count, "message"),
                        count,
                        leaves(group),
                    )
                })
                .collect();

            let count = authored.len();
            branch(
                user_id,
                NodeKind::User,
                user,
                format!(
                    "{} across {}",
                    plural(count, "message"),
                    plural(topic_count, "topic")
                ),
                count,
                children,
            )
        })
        .collect()
}

fn summarize_topic(topic: &str, group: &[&Message]) -> TopicAnalysis {
    let mut sentiment_distribution: BTreeMap<Sentiment, usize> =
        Sentiment::ALL.iter().map(|s| (*s, 0)).collect();
    for m in group {
        *sentiment_distribution
            .entry(m.effective_sentiment())
            .or_insert(0) += 1;
    }

    let unique_users = group
        .iter()
        .map(|m| m.user.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut conversations: Vec<Message> = group.iter().map(|m| (*m).clone()).collect();
    conversations.sort_by(chronological);

    let timespan = Timespan {
        start: conversations
            .first()
            .map(|m| m.timestamp.clone())
            .unwrap_or_default(),
        end: conversations
            .last()
            .map(|m| m.timestamp.clone())
            .unwrap_or_default(),
    };

    let keywords = extract_keywords(group.iter().map(|m| m.message.as_str()), MAX_KEYWORDS);

    TopicAnalysis {
        topic: topic.to_string(),
        message_count: group.len(),
        unique_users,
        dominant_sentiment: dominant_sentiment(&sentiment_distribution),
        sentiment_distribution,
        timespan,
        keywords,
        conversations,
    }
}

/// Highest count wins; ties go to the earlier label in [`Sentiment::ALL`].
fn dominant_sentiment(distribution: &BTreeMap<Sentiment, usize>) -> Sentiment {
    let mut best = Sentiment::Neutral;
    let mut best_count: Option<usize> = None;
    for sentiment in Sentiment::ALL {
        let count = distribution.get(&sentiment).copied().unwrap_or(0);
        if best_count.is_none_or(|b| count > b) {
            best = sentiment;
            best_count = Some(count);
        }
    }
    best
}

/// Groups messages by `key`, largest group first, ties in first-seen order.
fn group_ordered<'a, I, F>(messages: I, key: F) -> Vec<(&'a str, Vec<&'a Message>)>
where
    I: IntoIterator<Item = &'a Message>,
    F: Fn(&'a Message) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a Message>)> = Vec::new();

    for message in messages {
        let k = key(message);
        if let Some(bucket) = index.get(k).and_then(|&i| groups.get_mut(i)) {
            bucket.1.push(message);
        } else {
            index.insert(k, groups.len());
            groups.push((k, vec![message]));
        }
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
}

fn leaves(mut thread: Vec<&Message>) -> Vec<TreeNode> {
    thread.sort_by(|a, b| chronological(a, b));
    thread
        .into_iter()
        .map(|m| TreeNode {
            id: m.id.clone(),
            kind: NodeKind::Message,
            title: m.user.clone(),
            subtitle: Some(m.timestamp.clone()),
            count: None,
            children: None,
            payload: serde_json::to_value(m).ok(),
        })
        .collect()
}

fn branch(
    id: String,
    kind: NodeKind,
    title: &str,
    subtitle: String,
    count: usize,
    children: Vec<TreeNode>,
) -> TreeNode {
    TreeNode {
        id,
        kind,
        title: title.to_string(),
        subtitle: Some(subtitle),
        count: Some(count),
        children: Some(children),
        payload: None,
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
