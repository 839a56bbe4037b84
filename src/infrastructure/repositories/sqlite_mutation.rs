// src/infrastructure/repositories/sqlite_mutation.rs
//
// The only writer of content_items.body. Each commit path is one SQLite
// transaction covering the ledger insert, the body update, and the
// suggestion bookkeeping: all of it persists or none of it does.
use super::map_sqlx;
use super::sqlite_history::{CHANGE_COLUMNS, ChangeRow};
use crate::domain::content::{ContentBody, ContentItemId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::history::{
    ChangeHistoryRecord, ChangeType, ContentMutationRepository, RollbackCommit, SuggestionAnchor,
    TransitionCommit,
};
use crate::domain::suggestion::NewSuggestion;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

#[derive(Clone)]
pub struct SqliteContentMutationRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteContentMutationRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Optimistic guard: the stored body must still equal the snapshot the
    /// caller computed its transition against. On mismatch the whole
    /// transaction is abandoned and the caller must recompute.
    async fn guard_before_content(
        tx: &mut Transaction<'_, Sqlite>,
        content_item_id: ContentItemId,
        before_content: &ContentBody,
    ) -> DomainResult<()> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT body FROM content_items WHERE id = ?")
                .bind(i64::from(content_item_id))
                .fetch_optional(&mut **tx)
                .await
                .map_err(map_sqlx)?;

        let stored = stored.ok_or_else(|| {
            DomainError::NotFound(format!("content item {content_item_id} not found"))
        })?;

        if stored != before_content.as_str() {
            return Err(DomainError::Conflict(format!(
                "content item {content_item_id} changed since the transition was computed; recompute against the current content"
            )));
        }
        Ok(())
    }

    async fn insert_applied_suggestion(
        tx: &mut Transaction<'_, Sqlite>,
        suggestion: &NewSuggestion,
        now: DateTime<Utc>,
    ) -> DomainResult<i64> {
        sqlx::query_scalar(
            "INSERT INTO suggestions (content_item_id, proposer_id, kind, details, is_approved, is_applied, created_at, processed_at, applied_at) VALUES (?, ?, ?, ?, 1, 1, ?, ?, ?) RETURNING id",
        )
        .bind(i64::from(suggestion.content_item_id))
        .bind(i64::from(suggestion.proposer_id))
        .bind(suggestion.kind.as_str())
        .bind(&suggestion.details)
        .bind(suggestion.created_at)
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx)
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_change_row(
        tx: &mut Transaction<'_, Sqlite>,
        content_item_id: ContentItemId,
        suggestion_id: i64,
        editor_id: i64,
        diff: &str,
        before_content: &str,
        after_content: &str,
        change_type: ChangeType,
        description: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ChangeRow> {
        let sql = format!(
            "INSERT INTO change_history (content_item_id, suggestion_id, editor_id, diff, before_content, after_content, change_type, description, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?) RETURNING {CHANGE_COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRow>(&sql)
            .bind(i64::from(content_item_id))
            .bind(suggestion_id)
            .bind(editor_id)
            .bind(diff)
            .bind(before_content)
            .bind(after_content)
            .bind(change_type.as_str())
            .bind(description)
            .bind(now)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_sqlx)
    }

    async fn write_body(
        tx: &mut Transaction<'_, Sqlite>,
        content_item_id: ContentItemId,
        body: &ContentBody,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        sqlx::query("UPDATE content_items SET body = ?, updated_at = ? WHERE id = ?")
            .bind(body.as_str())
            .bind(now)
            .bind(i64::from(content_item_id))
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl ContentMutationRepository for SqliteContentMutationRepository {
    async fn commit_transition(
        &self,
        commit: TransitionCommit,
    ) -> DomainResult<ChangeHistoryRecord> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        Self::guard_before_content(&mut tx, commit.content_item_id, &commit.before_content)
            .await?;

        let suggestion_id = match &commit.anchor {
            SuggestionAnchor::Existing(id) => {
                let result = sqlx::query(
                    "UPDATE suggestions SET is_approved = 1, is_applied = 1, processed_at = ?, applied_at = ? WHERE id = ? AND processed_at IS NULL",
                )
                .bind(commit.committed_at)
                .bind(commit.committed_at)
                .bind(i64::from(*id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::NotFound(format!(
                        "pending suggestion {id} not found"
                    )));
                }
                i64::from(*id)
            }
            SuggestionAnchor::Synthetic(new) => {
                Self::insert_applied_suggestion(&mut tx, new, commit.committed_at).await?
            }
        };

        let row = Self::insert_change_row(
            &mut tx,
            commit.content_item_id,
            suggestion_id,
            i64::from(commit.editor_id),
            &commit.diff,
            commit.before_content.as_str(),
            commit.after_content.as_str(),
            commit.change_type,
            &commit.description,
            commit.committed_at,
        )
        .await?;

        Self::write_body(
            &mut tx,
            commit.content_item_id,
            &commit.after_content,
            commit.committed_at,
        )
        .await?;

        tx.commit().await.map_err(map_sqlx)?;
        ChangeHistoryRecord::try_from(row)
    }

    async fn commit_rollback(&self, commit: RollbackCommit) -> DomainResult<ChangeHistoryRecord> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        Self::guard_before_content(&mut tx, commit.content_item_id, &commit.before_content)
            .await?;

        // Re-read the target inside the transaction; a concurrent rollback
        // of the same change must lose here, not double-restore.
        let target_sql = format!("SELECT {CHANGE_COLUMNS} FROM change_history WHERE id = ?");
        let target = sqlx::query_as::<_, ChangeRow>(&target_sql)
            .bind(i64::from(commit.target_change_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("change {} not found", commit.target_change_id))
            })?;

        if target.content_item_id != i64::from(commit.content_item_id) {
            return Err(DomainError::NotFound(format!(
                "change {} not found for content item {}",
                commit.target_change_id, commit.content_item_id
            )));
        }
        if target.is_active == 0 {
            return Err(DomainError::Conflict(format!(
                "change {} has already been rolled back",
                commit.target_change_id
            )));
        }

        let synthetic = NewSuggestion::synthetic_rollback(
            commit.content_item_id,
            commit.actor_id,
            i64::from(commit.target_change_id),
            commit.committed_at,
        );
        let suggestion_id =
            Self::insert_applied_suggestion(&mut tx, &synthetic, commit.committed_at).await?;

        let row = Self::insert_change_row(
            &mut tx,
            commit.content_item_id,
            suggestion_id,
            i64::from(commit.actor_id),
            &commit.diff,
            commit.before_content.as_str(),
            commit.after_content.as_str(),
            ChangeType::Rollback,
            &commit.description,
            commit.committed_at,
        )
        .await?;

        Self::write_body(
            &mut tx,
            commit.content_item_id,
            &commit.after_content,
            commit.committed_at,
        )
        .await?;

        let marked = sqlx::query(
            "UPDATE change_history SET is_active = 0, rolled_back_at = ?, rolled_back_by = ? WHERE id = ? AND is_active = 1",
        )
        .bind(commit.committed_at)
        .bind(i64::from(commit.actor_id))
        .bind(i64::from(commit.target_change_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if marked.rows_affected() == 0 {
            return Err(DomainError::Conflict(format!(
                "change {} has already been rolled back",
                commit.target_change_id
            )));
        }

        // The undone edit's suggestion is no longer applied to the live
        // content.
        sqlx::query("UPDATE suggestions SET is_applied = 0 WHERE id = ?")
            .bind(target.suggestion_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        ChangeHistoryRecord::try_from(row)
    }
}
