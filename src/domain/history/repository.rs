// src/domain/history/repository.rs
use crate::domain::content::value_objects::{ActorId, ContentBody, ContentItemId};
use crate::domain::errors::DomainResult;
use crate::domain::history::entity::{ActiveChange, ChangeHistoryRecord, ChangeId, ChangeType};
use crate::domain::suggestion::entity::{NewSuggestion, SuggestionId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// How a transition is anchored to a suggestion. Every ledger entry carries
/// a suggestion id, including synthetic ones manufactured for rollbacks and
/// manual edits.
#[derive(Debug, Clone)]
pub enum SuggestionAnchor {
    /// An already-persisted pending suggestion; the commit approves it and
    /// marks it applied in the same transaction.
    Existing(SuggestionId),
    /// A synthetic suggestion inserted, already approved and applied,
    /// inside the commit's transaction.
    Synthetic(NewSuggestion),
}

/// Write model for one forward content transition.
#[derive(Debug, Clone)]
pub struct TransitionCommit {
    pub content_item_id: ContentItemId,
    pub editor_id: ActorId,
    pub before_content: ContentBody,
    pub after_content: ContentBody,
    pub diff: String,
    pub change_type: ChangeType,
    pub anchor: SuggestionAnchor,
    pub description: String,
    pub committed_at: DateTime<Utc>,
}

/// Write model for a rollback: a compensating forward transition plus the
/// bookkeeping on the record (and suggestion) being undone.
#[derive(Debug, Clone)]
pub struct RollbackCommit {
    pub content_item_id: ContentItemId,
    pub actor_id: ActorId,
    pub target_change_id: ChangeId,
    pub before_content: ContentBody,
    pub after_content: ContentBody,
    pub diff: String,
    pub description: String,
    pub committed_at: DateTime<Utc>,
}

#[async_trait]
pub trait ChangeHistoryRepository: Send + Sync {
    async fn find_by_id(&self, id: ChangeId) -> DomainResult<Option<ChangeHistoryRecord>>;

    /// Active entries for one content item, newest first, each joined with
    /// its suggestion's kind. Rolled-back entries are excluded.
    async fn list_active(&self, content_item_id: ContentItemId)
    -> DomainResult<Vec<ActiveChange>>;
}

/// The single writer of `ContentItem.body`. Both operations run as one
/// storage transaction and enforce the optimistic guard: the commit's
/// `before_content` must equal the stored body at commit time, otherwise
/// the write fails with a conflict and nothing persists.
#[async_trait]
pub trait ContentMutationRepository: Send + Sync {
    /// Atomically: insert the ledger entry, set the live body to
    /// `after_content`, and settle the suggestion anchor.
    async fn commit_transition(&self, commit: TransitionCommit)
    -> DomainResult<ChangeHistoryRecord>;

    /// Atomically: everything `commit_transition` does for the compensating
    /// entry (with a synthetic `other`-kind suggestion), plus marking the
    /// target record rolled back and un-applying its original suggestion.
    /// Fails with a conflict if the target already left the active state.
    async fn commit_rollback(&self, commit: RollbackCommit) -> DomainResult<ChangeHistoryRecord>;
}
