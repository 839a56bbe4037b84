use super::ChangeCommandService;
use crate::{
    application::{
        dto::RollbackOutcomeDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{ActorId, ContentBody, ContentItemId},
        history::{ChangeId, RollbackCommit, render_unified_diff},
    },
};

pub struct RollbackCommand {
    pub content_item_id: i64,
    pub change_id: i64,
    pub actor_id: i64,
}

impl ChangeCommandService {
    /// Undo a previously committed change by committing a compensating
    /// forward transition that restores the target's before-snapshot. The
    /// target record is marked rolled back in the same transaction; it is
    /// never deleted and never re-activated.
    pub async fn roll_back(&self, command: RollbackCommand) -> ApplicationResult<RollbackOutcomeDto> {
        let content_item_id = ContentItemId::new(command.content_item_id)?;
        let change_id = ChangeId::new(command.change_id)?;
        let actor_id = ActorId::new(command.actor_id)?;

        let target = self
            .history_repo
            .find_by_id(change_id)
            .await?
            .filter(|record| record.content_item_id == content_item_id)
            .ok_or_else(|| {
                ApplicationError::not_found(format!(
                    "change {change_id} not found for content item {content_item_id}"
                ))
            })?;

        if !target.is_active {
            return Err(ApplicationError::conflict(format!(
                "change {change_id} has already been rolled back"
            )));
        }

        let item = self
            .content_repo
            .find_by_id(content_item_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("content item {content_item_id} not found"))
            })?;

        // Known limitation: the restore overwrites the live body with the
        // target's before-snapshot even when later edits sit on top of the
        // target. Rejecting on drift vs. merging is a product decision left
        // to the embedding application; here we surface it loudly and
        // proceed, matching the established behavior.
        if item.body.as_str() != target.after_content {
            tracing::warn!(
                content_item_id = %content_item_id,
                change_id = %change_id,
                actor_id = %actor_id,
                "live content drifted past the rollback target; later edits will be discarded",
            );
        }

        let restored = ContentBody::new(target.before_content.clone())?;
        let undo_diff = render_unified_diff(item.body.as_str(), restored.as_str());

        let rollback_record = self
            .mutation_repo
            .commit_rollback(RollbackCommit {
                content_item_id,
                actor_id,
                target_change_id: change_id,
                before_content: item.body.clone(),
                after_content: restored,
                diff: undo_diff,
                description: format!("rollback of change {change_id}"),
                committed_at: self.clock.now(),
            })
            .await
            .map_err(|err| {
                tracing::error!(
                    content_item_id = %content_item_id,
                    change_id = %change_id,
                    actor_id = %actor_id,
                    error = %err,
                    "rollback commit failed",
                );
                ApplicationError::from(err)
            })?;

        tracing::info!(
            content_item_id = %content_item_id,
            change_id = %change_id,
            rollback_change_id = %rollback_record.id,
            actor_id = %actor_id,
            "change rolled back",
        );

        let message = format!(
            "change {change_id} rolled back; content restored to its prior state"
        );
        Ok(RollbackOutcomeDto {
            success: true,
            rollback_change: rollback_record.into(),
            message,
        })
    }
}
