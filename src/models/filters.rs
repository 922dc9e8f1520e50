//! Filter, sort and collaborator query types for the topic browser.

use serde::{Deserialize, Serialize};

use super::TopicStatus;

/// Status dimension of the filter bar.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Resolved,
}

impl StatusFilter {
    fn as_status(self) -> Option<TopicStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Open => Some(TopicStatus::Open),
            StatusFilter::Resolved => Some(TopicStatus::Resolved),
        }
    }
}

/// Ordering applied within the pinned and non-pinned partitions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Recent,
    Oldest,
    Popular,
    Views,
}

/// User-chosen browsing criteria. `None`/empty means "do not filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub category_id: Option<String>,
    pub tag: String,
    pub search_query: String,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// True when any of status, category, tag or search deviates from its default.
    /// The sort key does not count.
    pub fn has_active_filters(&self) -> bool {
        self.status != StatusFilter::All
            || self.category_id.is_some()
            || !self.tag.is_empty()
            || !self.search_query.is_empty()
    }

    /// Reset status, category, tag and search in one step, keeping the sort key.
    pub fn clear(&mut self) {
        self.status = StatusFilter::All;
        self.category_id = None;
        self.tag.clear();
        self.search_query.clear();
    }

    /// Build the request for the topic data collaborator.
    pub fn to_query(&self) -> TopicQuery {
        TopicQuery {
            status: self.status.as_status(),
            category_id: self.category_id.clone(),
            tag: (!self.tag.is_empty()).then(|| self.tag.clone()),
        }
    }
}

/// Upstream filter handed to the topic data collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TopicStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}
