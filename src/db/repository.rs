//! Database repository backing the topic data collaborator.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::browser::TopicSource;
use crate::errors::AppError;
use crate::models::{
    Category, CreateTopicRequest, ForumTopic, TopicCategory, TopicQuery, TopicStatus,
};

const TOPIC_SELECT: &str = "SELECT t.id, t.title, t.description, t.author_name, t.category_id, \
     c.name AS category_name, t.tags, t.status, t.is_pinned, t.created_at, t.last_activity_at, \
     t.answer_count, t.view_count \
     FROM topics t LEFT JOIN categories c ON c.id = t.category_id";

/// Database repository for topics and categories.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== TOPIC OPERATIONS ====================

    /// List topics matching every dimension present in `query`, newest first.
    pub async fn list_topics(&self, query: &TopicQuery) -> Result<Vec<ForumTopic>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new(TOPIC_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(status) = query.status {
            builder.push(" AND t.status = ").push_bind(status.as_str());
        }
        if let Some(category_id) = &query.category_id {
            builder
                .push(" AND t.category_id = ")
                .push_bind(category_id.clone());
        }
        if let Some(tag) = &query.tag {
            builder
                .push(" AND EXISTS (SELECT 1 FROM json_each(t.tags) WHERE json_each.value = ")
                .push_bind(tag.clone())
                .push(")");
        }
        builder.push(" ORDER BY t.created_at DESC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        let topics = rows
            .iter()
            .map(topic_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(?query, count = topics.len(), "Listed topics");
        Ok(topics)
    }

    /// Get a topic by ID.
    pub async fn get_topic(&self, id: &str) -> Result<Option<ForumTopic>, AppError> {
        let sql = format!("{} WHERE t.id = ?", TOPIC_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(topic_from_row).transpose()?)
    }

    /// Create a new open topic with no activity yet.
    pub async fn create_topic(&self, request: &CreateTopicRequest) -> Result<ForumTopic, AppError> {
        let category = match &request.category_id {
            Some(id) => Some(
                self.get_category(id)
                    .await?
                    .map(|c| TopicCategory {
                        id: c.id,
                        name: c.name,
                    })
                    .ok_or_else(|| AppError::Validation(format!("Unknown category {}", id)))?,
            ),
            None => None,
        };

        let topic = ForumTopic {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            author_name: request.author_name.clone(),
            category,
            tags: request.tags.clone(),
            status: TopicStatus::Open,
            is_pinned: false,
            created_at: Utc::now(),
            last_activity_at: None,
            answer_count: 0,
            view_count: Some(0),
        };

        self.insert_topic(&topic).await?;
        tracing::info!(topic_id = %topic.id, "Created topic");
        Ok(topic)
    }

    /// Insert a fully-formed topic row.
    pub async fn insert_topic(&self, topic: &ForumTopic) -> Result<(), AppError> {
        let tags_json = serde_json::to_string(&topic.tags)?;

        sqlx::query(
            "INSERT INTO topics (id, title, description, author_name, category_id, tags, status, is_pinned, created_at, last_activity_at, answer_count, view_count) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&topic.id)
        .bind(&topic.title)
        .bind(&topic.description)
        .bind(&topic.author_name)
        .bind(topic.category.as_ref().map(|c| c.id.clone()))
        .bind(&tags_json)
        .bind(topic.status.as_str())
        .bind(topic.is_pinned as i32)
        .bind(topic.created_at)
        .bind(topic.last_activity_at)
        .bind(i64::from(topic.answer_count))
        .bind(topic.view_count.map(i64::from))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== CATEGORY OPERATIONS ====================

    /// List all categories ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows =
            sqlx::query("SELECT id, name, slug, description FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Get a category by ID.
    pub async fn get_category(&self, id: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query("SELECT id, name, slug, description FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(category_from_row))
    }
}

#[async_trait::async_trait]
impl TopicSource for Repository {
    async fn fetch_topics(&self, query: &TopicQuery) -> Result<Vec<ForumTopic>, AppError> {
        self.list_topics(query).await
    }

    async fn fetch_categories(&self) -> Result<Vec<TopicCategory>, AppError> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .map(|c| TopicCategory {
                id: c.id,
                name: c.name,
            })
            .collect())
    }
}

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
    }
}

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ForumTopic, sqlx::Error> {
    let category_id: Option<String> = row.try_get("category_id")?;
    let category_name: Option<String> = row.try_get("category_name")?;
    let tags: String = row.try_get("tags")?;
    let status: String = row.try_get("status")?;
    let is_pinned: i32 = row.try_get("is_pinned")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let last_activity_at: Option<DateTime<Utc>> = row.try_get("last_activity_at")?;
    let answer_count: i64 = row.try_get("answer_count")?;
    let view_count: Option<i64> = row.try_get("view_count")?;

    Ok(ForumTopic {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        author_name: row.try_get("author_name")?,
        category: category_id
            .zip(category_name)
            .map(|(id, name)| TopicCategory { id, name }),
        tags: parse_json_array(&tags),
        status: TopicStatus::parse(&status),
        is_pinned: is_pinned != 0,
        created_at,
        last_activity_at,
        answer_count: u32::try_from(answer_count).unwrap_or(0),
        view_count: view_count.map(|v| u32::try_from(v).unwrap_or(0)),
    })
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
