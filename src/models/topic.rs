//! Forum topic model as delivered by the topic data collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a forum topic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Open,
    Resolved,
    #[serde(other)]
    Other,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Open => "open",
            TopicStatus::Resolved => "resolved",
            TopicStatus::Other => "other",
        }
    }

    /// Unknown values collapse to `Other` so stored rows never fail to load.
    pub fn parse(s: &str) -> Self {
        match s {
            "open" => TopicStatus::Open,
            "resolved" => TopicStatus::Resolved,
            _ => TopicStatus::Other,
        }
    }
}

/// Category reference embedded in a topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicCategory {
    pub id: String,
    pub name: String,
}

/// A community forum topic. Read-only for the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForumTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TopicCategory>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TopicStatus,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answer_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u32>,
}

impl ForumTopic {
    /// Timestamp used for "recent" ordering and the relative time label.
    pub fn activity_at(&self) -> DateTime<Utc> {
        self.last_activity_at.unwrap_or(self.created_at)
    }

    pub fn views(&self) -> u32 {
        self.view_count.unwrap_or(0)
    }

    pub fn author(&self) -> &str {
        self.author_name.as_deref().unwrap_or("")
    }
}

/// Request body for creating a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
