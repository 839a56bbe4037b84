pub mod content;
pub mod errors;
pub mod history;
pub mod suggestion;
