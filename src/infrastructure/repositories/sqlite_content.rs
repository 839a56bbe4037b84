use super::map_sqlx;
use crate::domain::content::{
    ContentBody, ContentItem, ContentItemId, ContentReadRepository, ContentTitle,
    ContentWriteRepository, NewContentItem,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Debug, FromRow)]
pub(super) struct ContentRow {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) body: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        Ok(ContentItem {
            id: ContentItemId::new(row.id)?,
            title: ContentTitle::new(row.title)?,
            body: ContentBody::new(row.body)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct SqliteContentReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteContentReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentReadRepository for SqliteContentReadRepository {
    async fn find_by_id(&self, id: ContentItemId) -> DomainResult<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT id, title, body, created_at, updated_at FROM content_items WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ContentItem::try_from).transpose()
    }
}

#[derive(Clone)]
pub struct SqliteContentWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteContentWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentWriteRepository for SqliteContentWriteRepository {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        let NewContentItem {
            title,
            body,
            created_at,
            updated_at,
        } = item;

        let row = sqlx::query_as::<_, ContentRow>(
            "INSERT INTO content_items (title, body, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id, title, body, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(body.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        ContentItem::try_from(row)
    }
}
