use super::map_sqlx;
use crate::domain::content::{ActorId, ContentItemId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::suggestion::{
    NewSuggestion, Suggestion, SuggestionId, SuggestionKind, SuggestionRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Debug, FromRow)]
pub(super) struct SuggestionRow {
    pub(super) id: i64,
    pub(super) content_item_id: i64,
    pub(super) proposer_id: i64,
    pub(super) kind: String,
    pub(super) details: String,
    pub(super) is_approved: i64,
    pub(super) is_applied: i64,
    pub(super) created_at: DateTime<Utc>,
    pub(super) processed_at: Option<DateTime<Utc>>,
    pub(super) applied_at: Option<DateTime<Utc>>,
}

impl TryFrom<SuggestionRow> for Suggestion {
    type Error = DomainError;

    fn try_from(row: SuggestionRow) -> Result<Self, Self::Error> {
        Ok(Suggestion {
            id: SuggestionId::new(row.id)?,
            content_item_id: ContentItemId::new(row.content_item_id)?,
            proposer_id: ActorId::new(row.proposer_id)?,
            kind: SuggestionKind::parse(&row.kind)?,
            details: row.details,
            is_approved: row.is_approved != 0,
            is_applied: row.is_applied != 0,
            created_at: row.created_at,
            processed_at: row.processed_at,
            applied_at: row.applied_at,
        })
    }
}

#[derive(Clone)]
pub struct SqliteSuggestionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSuggestionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuggestionRepository for SqliteSuggestionRepository {
    async fn insert(&self, suggestion: NewSuggestion) -> DomainResult<Suggestion> {
        let NewSuggestion {
            content_item_id,
            proposer_id,
            kind,
            details,
            created_at,
        } = suggestion;

        let row = sqlx::query_as::<_, SuggestionRow>(
            "INSERT INTO suggestions (content_item_id, proposer_id, kind, details, is_approved, is_applied, created_at) VALUES (?, ?, ?, ?, 0, 0, ?) RETURNING id, content_item_id, proposer_id, kind, details, is_approved, is_applied, created_at, processed_at, applied_at",
        )
        .bind(i64::from(content_item_id))
        .bind(i64::from(proposer_id))
        .bind(kind.as_str())
        .bind(&details)
        .bind(created_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Suggestion::try_from(row)
    }

    async fn mark_rejected(
        &self,
        id: SuggestionId,
        processed_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE suggestions SET processed_at = ? WHERE id = ? AND processed_at IS NULL",
        )
        .bind(processed_at)
        .bind(i64::from(id))
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "pending suggestion {id} not found"
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SuggestionId) -> DomainResult<Option<Suggestion>> {
        let row = sqlx::query_as::<_, SuggestionRow>(
            "SELECT id, content_item_id, proposer_id, kind, details, is_approved, is_applied, created_at, processed_at, applied_at FROM suggestions WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Suggestion::try_from).transpose()
    }
}
