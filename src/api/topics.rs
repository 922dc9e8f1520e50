//! Topic API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{success, ApiResult};
use crate::browser::{BrowserView, TopicBrowser};
use crate::errors::AppError;
use crate::models::{CreateTopicRequest, FilterCriteria, ForumTopic, SortKey, StatusFilter};
use crate::AppState;

/// Query parameters of the topic listing. Omitted values mean "all".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicListParams {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

impl TopicListParams {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            status: self.status,
            category_id: self
                .category_id
                .filter(|id| !id.is_empty() && id != "all"),
            tag: self.tag.unwrap_or_default(),
            search_query: self.q.unwrap_or_default(),
            sort: self.sort,
        }
    }
}

/// GET /api/topics - Filtered, searched and ordered topic listing.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> ApiResult<BrowserView> {
    let mut browser = TopicBrowser::with_criteria(params.into_criteria());
    browser.load_categories(state.repo.as_ref()).await?;
    browser.refresh(state.repo.as_ref()).await?;

    success(browser.view(Utc::now()))
}

/// GET /api/topics/:id - Get a single topic.
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ForumTopic> {
    match state.repo.get_topic(&id).await? {
        Some(topic) => success(topic),
        None => Err(AppError::NotFound(format!("Topic {} not found", id))),
    }
}

/// POST /api/topics - Create a new topic.
pub async fn create_topic(
    State(state): State<AppState>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<ForumTopic> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    success(state.repo.create_topic(&request).await?)
}
