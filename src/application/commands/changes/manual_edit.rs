use super::ChangeCommandService;
use crate::{
    application::{
        dto::ChangeRecordDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{ActorId, ContentBody, ContentItemId},
        history::{ChangeType, SuggestionAnchor, TransitionCommit, render_unified_diff},
        suggestion::{NewSuggestion, SuggestionKind},
    },
};

pub struct ManualEditCommand {
    pub content_item_id: i64,
    pub actor_id: i64,
    pub new_body: String,
    pub description: String,
}

impl ChangeCommandService {
    /// Administrator edit that bypasses the validator but not the ledger.
    /// A synthetic applied suggestion anchors the entry so every mutation,
    /// manual or not, traces back to a suggestion row.
    pub async fn edit_manually(
        &self,
        command: ManualEditCommand,
    ) -> ApplicationResult<ChangeRecordDto> {
        let content_item_id = ContentItemId::new(command.content_item_id)?;
        let actor_id = ActorId::new(command.actor_id)?;
        let new_body = ContentBody::new(command.new_body)?;

        let item = self
            .content_repo
            .find_by_id(content_item_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("content item {content_item_id} not found"))
            })?;

        if item.body == new_body {
            return Err(ApplicationError::validation(
                "manual edit does not change the content",
            ));
        }

        let now = self.clock.now();
        let diff = render_unified_diff(item.body.as_str(), new_body.as_str());
        let description = if command.description.trim().is_empty() {
            "manual edit".to_owned()
        } else {
            command.description
        };

        let record = self
            .mutation_repo
            .commit_transition(TransitionCommit {
                content_item_id,
                editor_id: actor_id,
                before_content: item.body.clone(),
                after_content: new_body,
                diff,
                change_type: ChangeType::Manual,
                anchor: SuggestionAnchor::Synthetic(NewSuggestion {
                    content_item_id,
                    proposer_id: actor_id,
                    kind: SuggestionKind::Other,
                    details: description.clone(),
                    created_at: now,
                }),
                description,
                committed_at: now,
            })
            .await
            .map_err(|err| {
                tracing::error!(
                    content_item_id = %content_item_id,
                    actor_id = %actor_id,
                    error = %err,
                    "manual edit commit failed",
                );
                ApplicationError::from(err)
            })?;

        tracing::info!(
            content_item_id = %content_item_id,
            change_id = %record.id,
            actor_id = %actor_id,
            "manual edit applied",
        );

        Ok(record.into())
    }
}
