// src/application/commands/suggestions/service.rs
use std::sync::Arc;

use crate::{
    application::ports::{time::Clock, validator::ContentValidator},
    domain::{
        content::ContentReadRepository, history::ContentMutationRepository,
        suggestion::SuggestionRepository,
    },
};

pub struct SuggestionCommandService {
    pub(super) content_repo: Arc<dyn ContentReadRepository>,
    pub(super) suggestion_repo: Arc<dyn SuggestionRepository>,
    pub(super) mutation_repo: Arc<dyn ContentMutationRepository>,
    pub(super) validator: Arc<dyn ContentValidator>,
    pub(super) clock: Arc<dyn Clock>,
}

impl SuggestionCommandService {
    pub fn new(
        content_repo: Arc<dyn ContentReadRepository>,
        suggestion_repo: Arc<dyn SuggestionRepository>,
        mutation_repo: Arc<dyn ContentMutationRepository>,
        validator: Arc<dyn ContentValidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            content_repo,
            suggestion_repo,
            mutation_repo,
            validator,
            clock,
        }
    }
}
