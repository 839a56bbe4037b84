pub mod changes;
pub mod history;

pub use changes::{ApplyOutcomeDto, ChangeRecordDto, RollbackOutcomeDto};
pub use history::{ChangeSummaryDto, ContentHistoryDto, ContentSummaryDto};
