use crate::domain::history::ChangeHistoryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full ledger entry as handed back to callers of the mutating operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecordDto {
    pub id: i64,
    pub content_item_id: i64,
    pub suggestion_id: i64,
    pub editor_id: i64,
    pub diff: String,
    pub before_content: String,
    pub after_content: String,
    pub change_type: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub rolled_back_at: Option<DateTime<Utc>>,
    pub rolled_back_by: Option<i64>,
}

impl From<ChangeHistoryRecord> for ChangeRecordDto {
    fn from(record: ChangeHistoryRecord) -> Self {
        Self {
            id: record.id.into(),
            content_item_id: record.content_item_id.into(),
            suggestion_id: record.suggestion_id.into(),
            editor_id: record.editor_id.into(),
            diff: record.diff,
            before_content: record.before_content,
            after_content: record.after_content,
            change_type: record.change_type.as_str().to_owned(),
            description: record.description,
            is_active: record.is_active,
            created_at: record.created_at,
            rolled_back_at: record.rolled_back_at,
            rolled_back_by: record.rolled_back_by.map(Into::into),
        }
    }
}

/// Result of `apply_suggestion`. A rejected-but-well-formed suggestion is
/// not an error; it comes back as `success == false` with the validator's
/// reason in `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcomeDto {
    pub success: bool,
    pub message: String,
    pub suggestion_id: i64,
    #[serde(default)]
    pub diff: Option<String>,
    #[serde(default)]
    pub change_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackOutcomeDto {
    pub success: bool,
    pub rollback_change: ChangeRecordDto,
    pub message: String,
}
