// src/application/ports/validator.rs
//
// Port for the external content-validation collaborator: the AI-backed
// service that decides whether a proposed edit is acceptable and computes
// the resulting content. Only the contract lives here; implementations
// belong to the embedding application.
use crate::domain::content::value_objects::ActorId;
use crate::domain::suggestion::SuggestionKind;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub title: String,
    pub current_content: String,
    pub suggestion_kind: SuggestionKind,
    pub suggestion_details: String,
    pub requester_id: ActorId,
}

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("validator unavailable: {0}")]
    Unavailable(String),
    #[error("validator timed out after {0:?}")]
    Timeout(Duration),
    #[error("validator contract violation: {0}")]
    Contract(String),
}

/// The validator's verdict, parsed strictly. Unknown fields and malformed
/// payloads are contract violations, never salvaged best-effort.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ValidatorVerdict {
    pub is_valid: bool,
    #[serde(default)]
    pub updated_content: Option<String>,
    #[serde(default)]
    pub diff: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A positive verdict with the contract already enforced: non-empty
/// updated content and diff.
#[derive(Debug, Clone)]
pub struct ApprovedEdit {
    pub updated_content: String,
    pub diff: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub enum VerdictOutcome {
    Approved(ApprovedEdit),
    Rejected { reason: String },
}

impl ValidatorVerdict {
    pub fn from_json(raw: &str) -> Result<Self, ValidatorError> {
        serde_json::from_str(raw)
            .map_err(|err| ValidatorError::Contract(format!("unparseable verdict: {err}")))
    }

    /// Enforce the contract: a positive verdict must carry non-empty
    /// `updated_content` and `diff`. An empty updated content on a positive
    /// verdict is never accepted as a no-op success.
    pub fn into_outcome(self) -> Result<VerdictOutcome, ValidatorError> {
        if !self.is_valid {
            let reason = self
                .reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| "suggestion rejected by validator".into());
            return Ok(VerdictOutcome::Rejected { reason });
        }

        let updated_content = self
            .updated_content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                ValidatorError::Contract("positive verdict with empty updated content".into())
            })?;
        let diff = self
            .diff
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| ValidatorError::Contract("positive verdict with empty diff".into()))?;

        Ok(VerdictOutcome::Approved(ApprovedEdit {
            updated_content,
            diff,
            description: self.description.unwrap_or_default(),
        }))
    }
}

#[async_trait]
pub trait ContentValidator: Send + Sync {
    async fn validate(&self, request: ValidationRequest)
    -> Result<ValidatorVerdict, ValidatorError>;
}
