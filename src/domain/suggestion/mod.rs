pub mod entity;
pub mod repository;

pub use entity::{NewSuggestion, Suggestion, SuggestionId, SuggestionKind};
pub use repository::SuggestionRepository;
