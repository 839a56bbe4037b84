// src/domain/history/entity.rs
use crate::domain::content::value_objects::{ActorId, ContentItemId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::suggestion::entity::SuggestionId;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeId(pub i64);

impl ChangeId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("change id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ChangeId> for i64 {
    fn from(value: ChangeId) -> Self {
        value.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Suggestion,
    Rollback,
    Manual,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Rollback => "rollback",
            Self::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "suggestion" => Ok(Self::Suggestion),
            "rollback" => Ok(Self::Rollback),
            "manual" => Ok(Self::Manual),
            other => Err(DomainError::Validation(format!(
                "unknown change type: {other}"
            ))),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the revision ledger: a full before/after snapshot pair plus
/// provenance. Append-only except for the one-way ACTIVE → ROLLED_BACK
/// transition; a record is never re-activated (undoing a rollback appends a
/// fresh active record instead).
#[derive(Debug, Clone)]
pub struct ChangeHistoryRecord {
    pub id: ChangeId,
    pub content_item_id: ContentItemId,
    pub suggestion_id: SuggestionId,
    pub editor_id: ActorId,
    /// Display-only unified diff. Never applied as a patch; the snapshots
    /// are canonical.
    pub diff: String,
    pub before_content: String,
    pub after_content: String,
    pub change_type: ChangeType,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub rolled_back_at: Option<DateTime<Utc>>,
    pub rolled_back_by: Option<ActorId>,
}

impl ChangeHistoryRecord {
    /// ACTIVE → ROLLED_BACK. Errors on a record that already left ACTIVE;
    /// the transition is never performed twice.
    pub fn mark_rolled_back(&mut self, actor: ActorId, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::Conflict(format!(
                "change {} has already been rolled back",
                self.id
            )));
        }
        self.is_active = false;
        self.rolled_back_at = Some(now);
        self.rolled_back_by = Some(actor);
        Ok(())
    }
}

/// An active ledger entry joined with the kind of the suggestion that
/// produced it, as served by the public history view.
#[derive(Debug, Clone)]
pub struct ActiveChange {
    pub record: ChangeHistoryRecord,
    pub suggestion_kind: crate::domain::suggestion::SuggestionKind,
}
