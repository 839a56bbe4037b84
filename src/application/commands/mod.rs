pub mod changes;
pub mod suggestions;
