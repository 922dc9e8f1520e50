//! Presentation helpers for the topic listing (pt-BR copy).

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::models::{ForumTopic, TopicStatus};
use crate::nav;

/// Tag chips shown per card before collapsing into "+N".
pub const MAX_CARD_TAGS: usize = 3;

const MONTHS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Relative age label: `agora`, `5min`, `3h`, `2d`, then a short date like `5 de mar.`.
pub fn format_time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "agora".to_string()
    } else if minutes < 60 {
        format!("{}min", minutes)
    } else if hours < 24 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else {
        format!("{} de {}", at.day(), MONTHS_PT_BR[at.month0() as usize])
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 tópico encontrado".to_string()
    } else {
        format!("{} tópicos encontrados", count)
    }
}

/// One row of the topic listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCard {
    pub id: String,
    pub href: String,
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub tags: Vec<String>,
    pub hidden_tag_count: usize,
    pub activity: String,
    pub answer_count: u32,
    pub view_count: u32,
    pub is_pinned: bool,
    pub is_resolved: bool,
}

impl TopicCard {
    pub fn new(topic: &ForumTopic, now: DateTime<Utc>) -> Self {
        let author = match topic.author_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "Anônimo".to_string(),
        };

        Self {
            id: topic.id.clone(),
            href: nav::topic_detail(&topic.id),
            title: topic.title.clone(),
            description: topic.description.clone(),
            author,
            category_name: topic.category.as_ref().map(|c| c.name.clone()),
            tags: topic.tags.iter().take(MAX_CARD_TAGS).cloned().collect(),
            hidden_tag_count: topic.tags.len().saturating_sub(MAX_CARD_TAGS),
            activity: format_time_ago(topic.activity_at(), now),
            answer_count: topic.answer_count,
            view_count: topic.views(),
            is_pinned: topic.is_pinned,
            is_resolved: topic.status == TopicStatus::Resolved,
        }
    }
}
