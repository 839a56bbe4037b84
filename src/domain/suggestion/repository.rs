use crate::domain::errors::DomainResult;
use crate::domain::suggestion::entity::{NewSuggestion, Suggestion, SuggestionId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Pending-side lifecycle only. Approval + `is_applied` flips happen inside
/// the mutation repository's transactions so they commit with the ledger row.
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Insert a suggestion in the pending state (`processed_at` null).
    async fn insert(&self, suggestion: NewSuggestion) -> DomainResult<Suggestion>;

    /// Mark a pending suggestion processed-but-not-applied after a negative
    /// validation verdict.
    async fn mark_rejected(
        &self,
        id: SuggestionId,
        processed_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    async fn find_by_id(&self, id: SuggestionId) -> DomainResult<Option<Suggestion>>;
}
