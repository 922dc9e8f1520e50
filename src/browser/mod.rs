//! Topic browser: client-side search and ordering over collaborator-filtered topics.
//!
//! Status, category and tag filtering happen upstream in a [`TopicSource`]. The browser
//! only narrows the returned set by free-text search and orders it, pinned topics first.

mod display;

pub use display::*;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{FilterCriteria, ForumTopic, SortKey, StatusFilter, TopicCategory, TopicQuery};
use crate::nav;

/// Topic data collaborator.
#[async_trait::async_trait]
pub trait TopicSource: Send + Sync {
    /// Topics matching every dimension present in `query`.
    async fn fetch_topics(&self, query: &TopicQuery) -> Result<Vec<ForumTopic>, AppError>;

    /// `{id, name}` pairs for the category filter.
    async fn fetch_categories(&self) -> Result<Vec<TopicCategory>, AppError>;
}

/// Case-insensitive literal substring match on title, description and author.
/// An empty query matches everything.
pub fn search_topics<'a>(topics: &'a [ForumTopic], query: &str) -> Vec<&'a ForumTopic> {
    if query.is_empty() {
        return topics.iter().collect();
    }
    let needle = query.to_lowercase();
    topics
        .iter()
        .filter(|topic| {
            topic.title.to_lowercase().contains(&needle)
                || topic.description.to_lowercase().contains(&needle)
                || topic.author().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Pinned before non-pinned, then by `key` within each partition.
pub fn compare_topics(a: &ForumTopic, b: &ForumTopic, key: SortKey) -> Ordering {
    b.is_pinned.cmp(&a.is_pinned).then_with(|| match key {
        SortKey::Popular => b.answer_count.cmp(&a.answer_count),
        SortKey::Views => b.views().cmp(&a.views()),
        SortKey::Oldest => a.created_at.cmp(&b.created_at),
        SortKey::Recent => b.activity_at().cmp(&a.activity_at()),
    })
}

/// Stable sort; ties keep collaborator order.
pub fn sort_topics(topics: &mut [&ForumTopic], key: SortKey) {
    topics.sort_by(|a, b| compare_topics(a, b, key));
}

/// Distinct tags across `topics`, ascending.
pub fn collect_tags(topics: &[ForumTopic]) -> Vec<String> {
    topics
        .iter()
        .flat_map(|topic| topic.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Search then sort, as rendered.
pub fn visible_topics<'a>(
    topics: &'a [ForumTopic],
    criteria: &FilterCriteria,
) -> Vec<&'a ForumTopic> {
    let mut result = search_topics(topics, &criteria.search_query);
    sort_topics(&mut result, criteria.sort);
    result
}

/// Call-to-action paired with the empty-state message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EmptyStateAction {
    ClearFilters,
    CreateTopic { href: String },
}

/// Shown when no topic survives the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub heading: &'static str,
    pub message: &'static str,
    pub action_label: &'static str,
    pub action: EmptyStateAction,
}

impl EmptyState {
    pub fn new(has_active_filters: bool) -> Self {
        if has_active_filters {
            Self {
                heading: "Nenhum tópico encontrado",
                message: "Tente ajustar os filtros ou limpar a busca",
                action_label: "Limpar filtros",
                action: EmptyStateAction::ClearFilters,
            }
        } else {
            Self {
                heading: "Nenhum tópico encontrado",
                message: "Seja o primeiro a iniciar uma discussão!",
                action_label: "Criar tópico",
                action: EmptyStateAction::CreateTopic {
                    href: nav::new_topic(None),
                },
            }
        }
    }
}

/// Everything needed to render the topic listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserView {
    pub topics: Vec<TopicCard>,
    pub total: usize,
    pub count_label: String,
    pub tags: Vec<String>,
    pub categories: Vec<TopicCategory>,
    pub has_active_filters: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    pub new_topic_href: String,
    pub home_href: String,
}

/// Loaded topics, the filter options and the current criteria.
#[derive(Debug, Clone, Default)]
pub struct TopicBrowser {
    topics: Vec<ForumTopic>,
    tag_options: Vec<String>,
    category_options: Vec<TopicCategory>,
    criteria: FilterCriteria,
}

impl TopicBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Replace the loaded topics and recompute the tag options from the full set.
    pub fn set_topics(&mut self, topics: Vec<ForumTopic>) {
        self.tag_options = collect_tags(&topics);
        self.topics = topics;
    }

    /// Fetch topics for the current upstream criteria.
    pub async fn refresh(&mut self, source: &dyn TopicSource) -> Result<(), AppError> {
        let query = self.criteria.to_query();
        let topics = source.fetch_topics(&query).await?;
        tracing::debug!(?query, count = topics.len(), "Refreshed topic browser");
        self.set_topics(topics);
        Ok(())
    }

    /// Load the category filter options.
    pub async fn load_categories(&mut self, source: &dyn TopicSource) -> Result<(), AppError> {
        self.category_options = source.fetch_categories().await?;
        Ok(())
    }

    pub fn topics(&self) -> &[ForumTopic] {
        &self.topics
    }

    pub fn tag_options(&self) -> &[String] {
        &self.tag_options
    }

    pub fn category_options(&self) -> &[TopicCategory] {
        &self.category_options
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.criteria.status = status;
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.criteria.category_id = category_id;
    }

    /// Select a tag from the current options; `""` clears the tag filter.
    /// Returns false, leaving the selection untouched, for tags not on offer.
    pub fn select_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() {
            self.criteria.tag.clear();
            return true;
        }
        if !self.tag_options.iter().any(|t| t == tag) {
            return false;
        }
        self.criteria.tag = tag.to_string();
        true
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.has_active_filters()
    }

    pub fn visible(&self) -> Vec<&ForumTopic> {
        visible_topics(&self.topics, &self.criteria)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.visible()
            .is_empty()
            .then(|| EmptyState::new(self.has_active_filters()))
    }

    /// Render-ready listing; relative times are computed against `now`.
    pub fn view(&self, now: chrono::DateTime<chrono::Utc>) -> BrowserView {
        let visible = self.visible();
        let has_active_filters = self.has_active_filters();
        BrowserView {
            total: visible.len(),
            count_label: count_label(visible.len()),
            empty_state: visible
                .is_empty()
                .then(|| EmptyState::new(has_active_filters)),
            topics: visible.iter().map(|t| TopicCard::new(t, now)).collect(),
            tags: self.tag_options.clone(),
            categories: self.category_options.clone(),
            has_active_filters,
            search_label: (!self.criteria.search_query.is_empty())
                .then(|| nav::search_result_label(&self.criteria.search_query, visible.len())),
            new_topic_href: nav::new_topic(None),
            home_href: nav::community_home(),
        }
    }
}
