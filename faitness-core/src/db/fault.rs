use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as QueryError};
use thiserror::Error;

/// Low-level persistence failure, before translation into [`crate::error::ApiError`].
#[derive(Debug, Error)]
pub enum Fault {
    #[error("connection pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The database could not be reached or the connection dropped.
    Connectivity,
    /// A constraint rejected the statement.
    Integrity(Constraint),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    ForeignKey,
    Unique,
    Check,
    Other,
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Pool(_) => FaultKind::Connectivity,
            Fault::Query(err) => classify_query_error(err),
        }
    }
}

fn classify_query_error(err: &QueryError) -> FaultKind {
    match err {
        QueryError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
                FaultKind::Connectivity
            }
            DatabaseErrorKind::ForeignKeyViolation => FaultKind::Integrity(Constraint::ForeignKey),
            DatabaseErrorKind::UniqueViolation => FaultKind::Integrity(Constraint::Unique),
            DatabaseErrorKind::CheckViolation => FaultKind::Integrity(Constraint::Check),
            DatabaseErrorKind::NotNullViolation => FaultKind::Integrity(Constraint::Other),
            _ => classify_message(info.message()),
        },
        QueryError::BrokenTransactionManager => FaultKind::Connectivity,
        _ => FaultKind::Other,
    }
}

/// Fallback for driver errors the typed kinds do not cover.
fn classify_message(message: &str) -> FaultKind {
    let message = message.to_lowercase();
    if message.contains("foreign key") {
        FaultKind::Integrity(Constraint::ForeignKey)
    } else if message.contains("unique constraint") {
        FaultKind::Integrity(Constraint::Unique)
    } else if message.contains("check constraint") {
        FaultKind::Integrity(Constraint::Check)
    } else if message.contains("constraint") {
        FaultKind::Integrity(Constraint::Other)
    } else {
        FaultKind::Other
    }
}
