// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{changes::ChangeCommandService, suggestions::SuggestionCommandService},
        ports::{time::Clock, validator::ContentValidator},
        queries::history::HistoryQueryService,
    },
    domain::{
        content::ContentReadRepository,
        history::{ChangeHistoryRepository, ContentMutationRepository},
        suggestion::SuggestionRepository,
    },
};

/// Wired application surface handed to the embedding application. Holds
/// the three operation groups: suggestion intake, rollback/manual edits,
/// and the public history view.
pub struct ApplicationServices {
    pub suggestion_commands: Arc<SuggestionCommandService>,
    pub change_commands: Arc<ChangeCommandService>,
    pub history_queries: Arc<HistoryQueryService>,
}

impl ApplicationServices {
    pub fn new(
        content_repo: Arc<dyn ContentReadRepository>,
        suggestion_repo: Arc<dyn SuggestionRepository>,
        history_repo: Arc<dyn ChangeHistoryRepository>,
        mutation_repo: Arc<dyn ContentMutationRepository>,
        validator: Arc<dyn ContentValidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let suggestion_commands = Arc::new(SuggestionCommandService::new(
            Arc::clone(&content_repo),
            Arc::clone(&suggestion_repo),
            Arc::clone(&mutation_repo),
            Arc::clone(&validator),
            Arc::clone(&clock),
        ));

        let change_commands = Arc::new(ChangeCommandService::new(
            Arc::clone(&content_repo),
            Arc::clone(&history_repo),
            Arc::clone(&mutation_repo),
            Arc::clone(&clock),
        ));

        let history_queries = Arc::new(HistoryQueryService::new(
            Arc::clone(&content_repo),
            Arc::clone(&history_repo),
        ));

        Self {
            suggestion_commands,
            change_commands,
            history_queries,
        }
    }
}
