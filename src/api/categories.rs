//! Category API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::browser::TopicSource;
use crate::models::TopicCategory;
use crate::AppState;

/// GET /api/categories - Options for the category filter.
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<TopicCategory>> {
    success(state.repo.fetch_categories().await?)
}
