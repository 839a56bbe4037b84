pub mod diff;
pub mod entity;
pub mod repository;

pub use diff::render_unified_diff;
pub use entity::{ActiveChange, ChangeHistoryRecord, ChangeId, ChangeType};
pub use repository::{
    ChangeHistoryRepository, ContentMutationRepository, RollbackCommit, SuggestionAnchor,
    TransitionCommit,
};
