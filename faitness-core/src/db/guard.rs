//! Operation decorators.
//!
//! Three wrappers every entity operation is composed from:
//!
//! - [`translate_faults`] turns a [`Fault`] into the [`ApiError`] taxonomy,
//! - [`require_found`] turns an absent lookup into [`ApiError::NotFound`],
//! - [`with_rollback`] runs a statement in a transaction that is rolled back
//!   before the fault is handed on.
//!
//! Writes compose as `translate_faults(with_rollback(..))`; reads as
//! `require_found(translate_faults(..))`. The [`From<Fault>`] impl at the
//! bottom is the service-wide fallback and should never be the path a fault
//! actually takes.

use diesel::prelude::*;
use diesel::result::QueryResult;
use log::{error, warn};

use crate::db::fault::{Constraint, Fault, FaultKind};
use crate::error::ApiError;

pub const UNABLE_TO_CONNECT: &str = "Unable to connect to database";
pub const REFERENCED_RESOURCE_MISSING: &str = "Referenced resource does not exist";
pub const RESOURCE_EXISTS: &str = "Resource already exists";
pub const INVALID_DATA: &str = "Invalid data provided";
pub const CONSTRAINT_VIOLATED: &str = "Data integrity constraint violated";

impl Constraint {
    pub fn conflict_message(self) -> &'static str {
        match self {
            Constraint::ForeignKey => REFERENCED_RESOURCE_MISSING,
            Constraint::Unique => RESOURCE_EXISTS,
            Constraint::Check => INVALID_DATA,
            Constraint::Other => CONSTRAINT_VIOLATED,
        }
    }
}

/// Runs `op` and maps any fault it raises onto the error taxonomy.
pub fn translate_faults<T>(
    operation: &str,
    op: impl FnOnce() -> Result<T, Fault>,
) -> Result<T, ApiError> {
    op().map_err(|fault| translate(operation, &fault))
}

pub fn translate(operation: &str, fault: &Fault) -> ApiError {
    match fault.kind() {
        FaultKind::Connectivity => {
            error!("Database connection error in {}: {}", operation, fault);
            ApiError::Database(UNABLE_TO_CONNECT.to_string())
        }
        FaultKind::Integrity(constraint) => {
            error!("Integrity error in {}: {}", operation, fault);
            ApiError::conflict(constraint.conflict_message())
        }
        FaultKind::Other => {
            error!("Unexpected error in {}: {}", operation, fault);
            ApiError::Internal
        }
    }
}

pub fn require_found<T>(resource: &'static str, row: Option<T>) -> Result<T, ApiError> {
    row.ok_or(ApiError::NotFound(resource))
}

/// Commits on success. On failure the transaction is rolled back once and the
/// error is handed on untouched.
pub fn with_rollback<T>(
    conn: &mut SqliteConnection,
    op: impl FnOnce(&mut SqliteConnection) -> QueryResult<T>,
) -> Result<T, Fault> {
    conn.transaction(op).map_err(|err| {
        warn!("Rolled back transaction: {}", err);
        Fault::from(err)
    })
}

/// Safety net for a `?` on a raw [`Fault`] outside the decorators. Every
/// operation in this crate goes through [`translate_faults`], so no request
/// path reaches this today; it only guarantees that a future one still maps
/// connectivity to 503 and integrity to 409 instead of leaking the fault.
impl From<Fault> for ApiError {
    fn from(fault: Fault) -> Self {
        error!("Fault escaped the operation decorators: {}", fault);
        match fault.kind() {
            FaultKind::Connectivity => ApiError::Unavailable,
            FaultKind::Integrity(_) => ApiError::conflict(CONSTRAINT_VIOLATED),
            FaultKind::Other => ApiError::Internal,
        }
    }
}
