// src/application/commands/changes/service.rs
use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::{
        content::ContentReadRepository,
        history::{ChangeHistoryRepository, ContentMutationRepository},
    },
};

pub struct ChangeCommandService {
    pub(super) content_repo: Arc<dyn ContentReadRepository>,
    pub(super) history_repo: Arc<dyn ChangeHistoryRepository>,
    pub(super) mutation_repo: Arc<dyn ContentMutationRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ChangeCommandService {
    pub fn new(
        content_repo: Arc<dyn ContentReadRepository>,
        history_repo: Arc<dyn ChangeHistoryRepository>,
        mutation_repo: Arc<dyn ContentMutationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            content_repo,
            history_repo,
            mutation_repo,
            clock,
        }
    }
}
