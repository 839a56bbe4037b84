use crate::domain::content::entity::{ContentItem, NewContentItem};
use crate::domain::content::value_objects::ContentItemId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ContentItemId) -> DomainResult<Option<ContentItem>>;
}

/// Creation only. Body updates go through `ContentMutationRepository` so
/// that every change to the live text lands in the ledger atomically.
#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem>;
}
