pub mod history;

pub use history::{HistoryQuery, HistoryQueryService};
