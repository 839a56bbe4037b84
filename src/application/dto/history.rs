use crate::domain::content::ContentItem;
use crate::domain::history::ActiveChange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummaryDto {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ContentItem> for ContentSummaryDto {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.into(),
            title: item.title.as_str().to_owned(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Public view of one active ledger entry. Deliberately omits the
/// before/after snapshots; those stay inside the audit surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSummaryDto {
    pub id: i64,
    pub change_type: String,
    pub description: String,
    pub editor_id: i64,
    pub suggestion_kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<ActiveChange> for ChangeSummaryDto {
    fn from(change: ActiveChange) -> Self {
        Self {
            id: change.record.id.into(),
            change_type: change.record.change_type.as_str().to_owned(),
            description: change.record.description,
            editor_id: change.record.editor_id.into(),
            suggestion_kind: change.suggestion_kind.as_str().to_owned(),
            created_at: change.record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentHistoryDto {
    pub content_item: ContentSummaryDto,
    pub changes: Vec<ChangeSummaryDto>,
    pub total_changes: u64,
}
