use super::map_sqlx;
use crate::domain::content::{ActorId, ContentItemId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::history::{
    ActiveChange, ChangeHistoryRecord, ChangeHistoryRepository, ChangeId, ChangeType,
};
use crate::domain::suggestion::{SuggestionId, SuggestionKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

#[derive(Debug, FromRow)]
pub(super) struct ChangeRow {
    pub(super) id: i64,
    pub(super) content_item_id: i64,
    pub(super) suggestion_id: i64,
    pub(super) editor_id: i64,
    pub(super) diff: String,
    pub(super) before_content: String,
    pub(super) after_content: String,
    pub(super) change_type: String,
    pub(super) description: String,
    pub(super) is_active: i64,
    pub(super) created_at: DateTime<Utc>,
    pub(super) rolled_back_at: Option<DateTime<Utc>>,
    pub(super) rolled_back_by: Option<i64>,
}

pub(super) const CHANGE_COLUMNS: &str = "id, content_item_id, suggestion_id, editor_id, diff, before_content, after_content, change_type, description, is_active, created_at, rolled_back_at, rolled_back_by";

impl TryFrom<ChangeRow> for ChangeHistoryRecord {
    type Error = DomainError;

    fn try_from(row: ChangeRow) -> Result<Self, Self::Error> {
        Ok(ChangeHistoryRecord {
            id: ChangeId::new(row.id)?,
            content_item_id: ContentItemId::new(row.content_item_id)?,
            suggestion_id: SuggestionId::new(row.suggestion_id)?,
            editor_id: ActorId::new(row.editor_id)?,
            diff: row.diff,
            before_content: row.before_content,
            after_content: row.after_content,
            change_type: ChangeType::parse(&row.change_type)?,
            description: row.description,
            is_active: row.is_active != 0,
            created_at: row.created_at,
            rolled_back_at: row.rolled_back_at,
            rolled_back_by: row.rolled_back_by.map(ActorId::new).transpose()?,
        })
    }
}

/// Change row joined with the kind of its suggestion, for the active view.
#[derive(Debug, FromRow)]
struct ActiveChangeRow {
    #[sqlx(flatten)]
    change: ChangeRow,
    suggestion_kind: String,
}

#[derive(Clone)]
pub struct SqliteChangeHistoryRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteChangeHistoryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChangeHistoryRepository for SqliteChangeHistoryRepository {
    async fn find_by_id(&self, id: ChangeId) -> DomainResult<Option<ChangeHistoryRecord>> {
        let sql = format!("SELECT {CHANGE_COLUMNS} FROM change_history WHERE id = ?");
        let row = sqlx::query_as::<_, ChangeRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(ChangeHistoryRecord::try_from).transpose()
    }

    async fn list_active(
        &self,
        content_item_id: ContentItemId,
    ) -> DomainResult<Vec<ActiveChange>> {
        let rows = sqlx::query_as::<_, ActiveChangeRow>(
            r#"
            SELECT ch.id, ch.content_item_id, ch.suggestion_id, ch.editor_id, ch.diff,
                   ch.before_content, ch.after_content, ch.change_type, ch.description,
                   ch.is_active, ch.created_at, ch.rolled_back_at, ch.rolled_back_by,
                   s.kind AS suggestion_kind
            FROM change_history ch
            JOIN suggestions s ON s.id = ch.suggestion_id
            WHERE ch.content_item_id = ? AND ch.is_active = 1
            ORDER BY ch.created_at DESC, ch.id DESC
            "#,
        )
        .bind(i64::from(content_item_id))
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok(ActiveChange {
                    record: ChangeHistoryRecord::try_from(row.change)?,
                    suggestion_kind: SuggestionKind::parse(&row.suggestion_kind)?,
                })
            })
            .collect()
    }
}
