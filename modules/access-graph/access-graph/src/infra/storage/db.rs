//! Classification of store errors into domain errors.

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Constraint family a failed write tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

pub(crate) fn violation(e: &DbErr) -> Option<Violation> {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(Violation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => Some(Violation::ForeignKey),
        _ => None,
    }
}

/// Fallback mapping for errors a repository has no specific meaning for.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn db_err(e: DbErr) -> DomainError {
    tracing::debug!(error = %e, "storage operation failed");
    match violation(&e) {
        Some(Violation::ForeignKey) => DomainError::reference_violation(e.to_string()),
        _ => DomainError::database(e.to_string()),
    }
}

/// Maps a unique violation to `on_unique`, everything else through [`db_err`].
pub(crate) fn map_unique(e: DbErr, on_unique: impl FnOnce() -> DomainError) -> DomainError {
    if violation(&e) == Some(Violation::Unique) {
        on_unique()
    } else {
        db_err(e)
    }
}
