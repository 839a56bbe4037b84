// src/application/queries/history.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{ChangeSummaryDto, ContentHistoryDto, ContentSummaryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{ContentItemId, ContentReadRepository},
        history::ChangeHistoryRepository,
    },
};

pub struct HistoryQuery {
    pub content_item_id: i64,
}

pub struct HistoryQueryService {
    content_repo: Arc<dyn ContentReadRepository>,
    history_repo: Arc<dyn ChangeHistoryRepository>,
}

impl HistoryQueryService {
    pub fn new(
        content_repo: Arc<dyn ContentReadRepository>,
        history_repo: Arc<dyn ChangeHistoryRepository>,
    ) -> Self {
        Self {
            content_repo,
            history_repo,
        }
    }

    /// The public, display-facing view of the ledger: active entries only,
    /// newest first, without the before/after snapshots.
    pub async fn history(&self, query: HistoryQuery) -> ApplicationResult<ContentHistoryDto> {
        let content_item_id = ContentItemId::new(query.content_item_id)?;

        let item = self
            .content_repo
            .find_by_id(content_item_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("content item {content_item_id} not found"))
            })?;

        let changes = self.history_repo.list_active(content_item_id).await?;
        let total_changes = changes.len() as u64;
        let changes = changes
            .into_iter()
            .map(ChangeSummaryDto::from)
            .collect::<Vec<_>>();

        Ok(ContentHistoryDto {
            content_item: ContentSummaryDto::from(&item),
            changes,
            total_changes,
        })
    }
}
