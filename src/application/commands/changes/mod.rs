// src/application/commands/changes/mod.rs
mod manual_edit;
mod rollback;
mod service;

pub use manual_edit::ManualEditCommand;
pub use rollback::RollbackCommand;
pub use service::ChangeCommandService;
