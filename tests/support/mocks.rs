// tests/support/mocks.rs
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use emend_core::application::ports::time::Clock;
use emend_core::application::ports::validator::{
    ContentValidator, ValidationRequest, ValidatorError, ValidatorVerdict,
};
use emend_core::application::services::ApplicationServices;
use emend_core::domain::content::{
    ContentBody, ContentItem, ContentItemId, ContentReadRepository, ContentTitle,
    ContentWriteRepository, NewContentItem,
};
use emend_core::domain::errors::{DomainError, DomainResult};
use emend_core::domain::history::{
    ActiveChange, ChangeHistoryRecord, ChangeHistoryRepository, ChangeId,
    ContentMutationRepository, RollbackCommit, SuggestionAnchor, TransitionCommit,
};
use emend_core::domain::suggestion::{
    NewSuggestion, Suggestion, SuggestionId, SuggestionRepository,
};

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/* ------------------------------- in-memory ledger ------------------------------- */

#[derive(Default)]
struct LedgerState {
    content: HashMap<i64, ContentItem>,
    suggestions: HashMap<i64, Suggestion>,
    changes: HashMap<i64, ChangeHistoryRecord>,
    next_content_id: i64,
    next_suggestion_id: i64,
    next_change_id: i64,
}

/// One in-memory store implementing every repository trait, so service
/// tests can assert cross-table effects without a database.
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LedgerState {
                next_content_id: 1,
                next_suggestion_id: 1,
                next_change_id: 1,
                ..LedgerState::default()
            }),
        })
    }

    pub fn seed_content(&self, title: &str, body: &str) -> ContentItem {
        let mut state = self.state.lock().unwrap();
        let id = state.next_content_id;
        state.next_content_id += 1;
        let item = ContentItem {
            id: ContentItemId::new(id).unwrap(),
            title: ContentTitle::new(title).unwrap(),
            body: ContentBody::new(body).unwrap(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        state.content.insert(id, item.clone());
        item
    }

    pub fn content(&self, id: i64) -> Option<ContentItem> {
        self.state.lock().unwrap().content.get(&id).cloned()
    }

    pub fn suggestion(&self, id: i64) -> Option<Suggestion> {
        self.state.lock().unwrap().suggestions.get(&id).cloned()
    }

    pub fn change(&self, id: i64) -> Option<ChangeHistoryRecord> {
        self.state.lock().unwrap().changes.get(&id).cloned()
    }

    pub fn change_count(&self) -> usize {
        self.state.lock().unwrap().changes.len()
    }

    pub fn suggestion_count(&self) -> usize {
        self.state.lock().unwrap().suggestions.len()
    }

    fn insert_suggestion_locked(
        state: &mut LedgerState,
        new: NewSuggestion,
        applied: bool,
        now: DateTime<Utc>,
    ) -> Suggestion {
        let id = state.next_suggestion_id;
        state.next_suggestion_id += 1;
        let suggestion = Suggestion {
            id: SuggestionId::new(id).unwrap(),
            content_item_id: new.content_item_id,
            proposer_id: new.proposer_id,
            kind: new.kind,
            details: new.details,
            is_approved: applied,
            is_applied: applied,
            created_at: new.created_at,
            processed_at: applied.then_some(now),
            applied_at: applied.then_some(now),
        };
        state.suggestions.insert(id, suggestion.clone());
        suggestion
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryLedger {
    async fn find_by_id(&self, id: ContentItemId) -> DomainResult<Option<ContentItem>> {
        Ok(self.state.lock().unwrap().content.get(&i64::from(id)).cloned())
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryLedger {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_content_id;
        state.next_content_id += 1;
        let item = ContentItem {
            id: ContentItemId::new(id)?,
            title: item.title,
            body: item.body,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        state.content.insert(id, item.clone());
        Ok(item)
    }
}

#[async_trait]
impl SuggestionRepository for InMemoryLedger {
    async fn insert(&self, suggestion: NewSuggestion) -> DomainResult<Suggestion> {
        let mut state = self.state.lock().unwrap();
        let now = suggestion.created_at;
        Ok(Self::insert_suggestion_locked(
            &mut state, suggestion, false, now,
        ))
    }

    async fn mark_rejected(
        &self,
        id: SuggestionId,
        processed_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let suggestion = state
            .suggestions
            .get_mut(&i64::from(id))
            .filter(|s| s.is_pending())
            .ok_or_else(|| DomainError::NotFound(format!("pending suggestion {id} not found")))?;
        suggestion.processed_at = Some(processed_at);
        Ok(())
    }

    async fn find_by_id(&self, id: SuggestionId) -> DomainResult<Option<Suggestion>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .suggestions
            .get(&i64::from(id))
            .cloned())
    }
}

#[async_trait]
impl ChangeHistoryRepository for InMemoryLedger {
    async fn find_by_id(&self, id: ChangeId) -> DomainResult<Option<ChangeHistoryRecord>> {
        Ok(self.state.lock().unwrap().changes.get(&i64::from(id)).cloned())
    }

    async fn list_active(
        &self,
        content_item_id: ContentItemId,
    ) -> DomainResult<Vec<ActiveChange>> {
        let state = self.state.lock().unwrap();
        let mut records: Vec<_> = state
            .changes
            .values()
            .filter(|r| r.is_active && r.content_item_id == content_item_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(i64::from(b.id).cmp(&i64::from(a.id)))
        });

        records
            .into_iter()
            .map(|record| {
                let kind = state
                    .suggestions
                    .get(&i64::from(record.suggestion_id))
                    .map(|s| s.kind)
                    .ok_or_else(|| {
                        DomainError::Persistence(format!(
                            "suggestion {} missing for change {}",
                            record.suggestion_id, record.id
                        ))
                    })?;
                Ok(ActiveChange {
                    record,
                    suggestion_kind: kind,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ContentMutationRepository for InMemoryLedger {
    async fn commit_transition(
        &self,
        commit: TransitionCommit,
    ) -> DomainResult<ChangeHistoryRecord> {
        let mut state = self.state.lock().unwrap();
        let item_id = i64::from(commit.content_item_id);

        let stored = state
            .content
            .get(&item_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("content item {} not found", commit.content_item_id))
            })?
            .body
            .clone();
        if stored != commit.before_content {
            return Err(DomainError::Conflict(format!(
                "content item {} changed since the transition was computed; recompute against the current content",
                commit.content_item_id
            )));
        }

        let suggestion_id = match &commit.anchor {
            SuggestionAnchor::Existing(id) => {
                let suggestion = state
                    .suggestions
                    .get_mut(&i64::from(*id))
                    .filter(|s| s.is_pending())
                    .ok_or_else(|| {
                        DomainError::NotFound(format!("pending suggestion {id} not found"))
                    })?;
                suggestion.is_approved = true;
                suggestion.is_applied = true;
                suggestion.processed_at = Some(commit.committed_at);
                suggestion.applied_at = Some(commit.committed_at);
                *id
            }
            SuggestionAnchor::Synthetic(new) => {
                Self::insert_suggestion_locked(&mut state, new.clone(), true, commit.committed_at)
                    .id
            }
        };

        let change_id = state.next_change_id;
        state.next_change_id += 1;
        let record = ChangeHistoryRecord {
            id: ChangeId::new(change_id)?,
            content_item_id: commit.content_item_id,
            suggestion_id,
            editor_id: commit.editor_id,
            diff: commit.diff,
            before_content: commit.before_content.into_inner(),
            after_content: commit.after_content.as_str().to_owned(),
            change_type: commit.change_type,
            description: commit.description,
            is_active: true,
            created_at: commit.committed_at,
            rolled_back_at: None,
            rolled_back_by: None,
        };
        state.changes.insert(change_id, record.clone());

        let item = state.content.get_mut(&item_id).expect("checked above");
        item.set_body(commit.after_content, commit.committed_at);

        Ok(record)
    }

    async fn commit_rollback(&self, commit: RollbackCommit) -> DomainResult<ChangeHistoryRecord> {
        let mut state = self.state.lock().unwrap();
        let item_id = i64::from(commit.content_item_id);
        let target_id = i64::from(commit.target_change_id);

        let stored = state
            .content
            .get(&item_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("content item {} not found", commit.content_item_id))
            })?
            .body
            .clone();
        if stored != commit.before_content {
            return Err(DomainError::Conflict(format!(
                "content item {} changed since the transition was computed; recompute against the current content",
                commit.content_item_id
            )));
        }

        let target = state
            .changes
            .get(&target_id)
            .filter(|r| r.content_item_id == commit.content_item_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::NotFound(format!("change {} not found", commit.target_change_id))
            })?;
        if !target.is_active {
            return Err(DomainError::Conflict(format!(
                "change {} has already been rolled back",
                commit.target_change_id
            )));
        }

        let synthetic = NewSuggestion::synthetic_rollback(
            commit.content_item_id,
            commit.actor_id,
            target_id,
            commit.committed_at,
        );
        let suggestion =
            Self::insert_suggestion_locked(&mut state, synthetic, true, commit.committed_at);

        let change_id = state.next_change_id;
        state.next_change_id += 1;
        let record = ChangeHistoryRecord {
            id: ChangeId::new(change_id)?,
            content_item_id: commit.content_item_id,
            suggestion_id: suggestion.id,
            editor_id: commit.actor_id,
            diff: commit.diff,
            before_content: commit.before_content.into_inner(),
            after_content: commit.after_content.as_str().to_owned(),
            change_type: emend_core::domain::history::ChangeType::Rollback,
            description: commit.description,
            is_active: true,
            created_at: commit.committed_at,
            rolled_back_at: None,
            rolled_back_by: None,
        };
        state.changes.insert(change_id, record.clone());

        let item = state.content.get_mut(&item_id).expect("checked above");
        item.set_body(commit.after_content, commit.committed_at);

        let stored_target = state.changes.get_mut(&target_id).expect("checked above");
        stored_target.mark_rolled_back(commit.actor_id, commit.committed_at)?;

        if let Some(original) = state.suggestions.get_mut(&i64::from(target.suggestion_id)) {
            original.is_applied = false;
        }

        Ok(record)
    }
}

/* ------------------------------- scripted validator ------------------------------- */

/// Returns pre-programmed verdicts in order; panics if called more often
/// than scripted.
pub struct ScriptedValidator {
    verdicts: Mutex<VecDeque<Result<ValidatorVerdict, ValidatorError>>>,
}

impl ScriptedValidator {
    pub fn with(verdicts: Vec<Result<ValidatorVerdict, ValidatorError>>) -> Arc<Self> {
        Arc::new(Self {
            verdicts: Mutex::new(verdicts.into()),
        })
    }

    pub fn approving(updated_content: &str, diff: &str, description: &str) -> Arc<Self> {
        Self::with(vec![Ok(ValidatorVerdict {
            is_valid: true,
            updated_content: Some(updated_content.to_owned()),
            diff: Some(diff.to_owned()),
            description: Some(description.to_owned()),
            reason: None,
        })])
    }

    pub fn rejecting(reason: &str) -> Arc<Self> {
        Self::with(vec![Ok(ValidatorVerdict {
            is_valid: false,
            updated_content: None,
            diff: None,
            description: None,
            reason: Some(reason.to_owned()),
        })])
    }
}

#[async_trait]
impl ContentValidator for ScriptedValidator {
    async fn validate(
        &self,
        _request: ValidationRequest,
    ) -> Result<ValidatorVerdict, ValidatorError> {
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedValidator called more often than scripted")
    }
}

/* ------------------------------- wiring ------------------------------- */

pub fn services_with(
    ledger: &Arc<InMemoryLedger>,
    validator: Arc<dyn ContentValidator>,
) -> ApplicationServices {
    ApplicationServices::new(
        Arc::clone(ledger) as Arc<dyn ContentReadRepository>,
        Arc::clone(ledger) as Arc<dyn SuggestionRepository>,
        Arc::clone(ledger) as Arc<dyn ChangeHistoryRepository>,
        Arc::clone(ledger) as Arc<dyn ContentMutationRepository>,
        validator,
        Arc::new(FixedClock),
    )
}
