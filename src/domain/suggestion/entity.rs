// src/domain/suggestion/entity.rs
use crate::domain::content::value_objects::{ActorId, ContentItemId};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuggestionId(pub i64);

impl SuggestionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "suggestion id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SuggestionId> for i64 {
    fn from(value: SuggestionId) -> Self {
        value.0
    }
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set. Persistence round-trips through `as_str`/`parse`; adding a
/// kind means touching every exhaustive match, which is the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Correction,
    Clarification,
    Example,
    Other,
}

impl SuggestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correction => "correction",
            Self::Clarification => "clarification",
            Self::Example => "example",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "correction" => Ok(Self::Correction),
            "clarification" => Ok(Self::Clarification),
            "example" => Ok(Self::Example),
            "other" => Ok(Self::Other),
            other => Err(DomainError::Validation(format!(
                "unknown suggestion kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change a content item. Created pending; once `processed_at`
/// is set the record is frozen except for the single `is_applied` flip a
/// rollback performs on the suggestion it undoes.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub content_item_id: ContentItemId,
    pub proposer_id: ActorId,
    pub kind: SuggestionKind,
    pub details: String,
    pub is_approved: bool,
    pub is_applied: bool,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub applied_at: Option<DateTime<Utc>>,
}

impl Suggestion {
    pub fn is_pending(&self) -> bool {
        self.processed_at.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub content_item_id: ContentItemId,
    pub proposer_id: ActorId,
    pub kind: SuggestionKind,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl NewSuggestion {
    /// The suggestion a rollback manufactures so the new ledger entry still
    /// has a suggestion to anchor to. Always kind `other`, always already
    /// approved and applied by the time it is persisted.
    pub fn synthetic_rollback(
        content_item_id: ContentItemId,
        actor_id: ActorId,
        target_change_id: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            content_item_id,
            proposer_id: actor_id,
            kind: SuggestionKind::Other,
            details: format!("rollback of change {target_change_id}"),
            created_at: now,
        }
    }
}
