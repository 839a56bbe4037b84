// src/application/commands/suggestions/mod.rs
mod apply;
mod service;

pub use apply::ApplySuggestionCommand;
pub use service::SuggestionCommandService;
