// src/infrastructure/repositories/mod.rs
mod sqlite_content;
mod sqlite_history;
mod sqlite_mutation;
mod sqlite_suggestion;

pub use sqlite_content::{SqliteContentReadRepository, SqliteContentWriteRepository};
pub use sqlite_history::SqliteChangeHistoryRepository;
pub use sqlite_mutation::SqliteContentMutationRepository;
pub use sqlite_suggestion::SqliteSuggestionRepository;

use crate::domain::errors::DomainError;

// SQLite extended result codes for constraint failures.
const CODE_FOREIGN_KEY: &str = "787";
const CODE_UNIQUE: &str = "2067";
const CODE_PRIMARY_KEY: &str = "1555";
const CODE_CHECK: &str = "275";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    CODE_FOREIGN_KEY => {
                        return DomainError::Conflict(
                            "referenced record is missing or still referenced by history".into(),
                        );
                    }
                    CODE_UNIQUE | CODE_PRIMARY_KEY => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    CODE_CHECK => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
