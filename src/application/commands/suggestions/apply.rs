use super::SuggestionCommandService;
use crate::{
    application::{
        dto::ApplyOutcomeDto,
        error::{ApplicationError, ApplicationResult},
        ports::validator::{ValidationRequest, VerdictOutcome},
    },
    domain::{
        content::{ActorId, ContentBody, ContentItemId},
        history::{ChangeType, SuggestionAnchor, TransitionCommit},
        suggestion::{NewSuggestion, SuggestionKind},
    },
};

pub struct ApplySuggestionCommand {
    pub content_item_id: i64,
    pub proposer_id: i64,
    pub kind: SuggestionKind,
    pub details: String,
}

impl SuggestionCommandService {
    /// Propose → validate → commit. The validator call is the only
    /// long-latency step and happens before any storage transaction; a
    /// validator failure leaves the suggestion pending and the ledger
    /// untouched.
    pub async fn apply_suggestion(
        &self,
        command: ApplySuggestionCommand,
    ) -> ApplicationResult<ApplyOutcomeDto> {
        let content_item_id = ContentItemId::new(command.content_item_id)?;
        let proposer_id = ActorId::new(command.proposer_id)?;
        if command.details.trim().is_empty() {
            return Err(ApplicationError::validation(
                "suggestion details cannot be empty",
            ));
        }

        let item = self
            .content_repo
            .find_by_id(content_item_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("content item {content_item_id} not found"))
            })?;

        let suggestion = self
            .suggestion_repo
            .insert(NewSuggestion {
                content_item_id,
                proposer_id,
                kind: command.kind,
                details: command.details.clone(),
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(
            content_item_id = %content_item_id,
            suggestion_id = %suggestion.id,
            proposer_id = %proposer_id,
            kind = %command.kind,
            "submitting suggestion to validator",
        );

        let verdict = self
            .validator
            .validate(ValidationRequest {
                title: item.title.as_str().to_owned(),
                current_content: item.body.as_str().to_owned(),
                suggestion_kind: command.kind,
                suggestion_details: command.details,
                requester_id: proposer_id,
            })
            .await
            .map_err(|err| {
                tracing::warn!(
                    content_item_id = %content_item_id,
                    suggestion_id = %suggestion.id,
                    error = %err,
                    "validator call failed; suggestion stays pending",
                );
                ApplicationError::external_service(err.to_string())
            })?;

        let edit = match verdict.into_outcome().map_err(|err| {
            tracing::warn!(
                content_item_id = %content_item_id,
                suggestion_id = %suggestion.id,
                error = %err,
                "validator verdict violated its contract",
            );
            ApplicationError::external_service(err.to_string())
        })? {
            VerdictOutcome::Rejected { reason } => {
                self.suggestion_repo
                    .mark_rejected(suggestion.id, self.clock.now())
                    .await?;
                tracing::info!(
                    content_item_id = %content_item_id,
                    suggestion_id = %suggestion.id,
                    reason = %reason,
                    "suggestion rejected by validator",
                );
                return Ok(ApplyOutcomeDto {
                    success: false,
                    message: reason,
                    suggestion_id: suggestion.id.into(),
                    diff: None,
                    change_id: None,
                });
            }
            VerdictOutcome::Approved(edit) => edit,
        };

        let after_content = ContentBody::new(edit.updated_content)?;
        let record = self
            .mutation_repo
            .commit_transition(TransitionCommit {
                content_item_id,
                editor_id: proposer_id,
                before_content: item.body.clone(),
                after_content,
                diff: edit.diff.clone(),
                change_type: ChangeType::Suggestion,
                anchor: SuggestionAnchor::Existing(suggestion.id),
                description: edit.description,
                committed_at: self.clock.now(),
            })
            .await
            .map_err(|err| {
                // The validator's output is discarded on failure: the call is
                // non-idempotent, and re-validating against possibly-changed
                // content is safer than a blind retry.
                tracing::error!(
                    content_item_id = %content_item_id,
                    suggestion_id = %suggestion.id,
                    proposer_id = %proposer_id,
                    error = %err,
                    "apply_suggestion commit failed after positive validation",
                );
                ApplicationError::from(err)
            })?;

        tracing::info!(
            content_item_id = %content_item_id,
            suggestion_id = %suggestion.id,
            change_id = %record.id,
            "suggestion applied",
        );

        Ok(ApplyOutcomeDto {
            success: true,
            message: "suggestion applied".into(),
            suggestion_id: suggestion.id.into(),
            diff: Some(edit.diff),
            change_id: Some(record.id.into()),
        })
    }
}
