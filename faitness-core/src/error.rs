//! User-facing error taxonomy.
//!
//! Every failure an entity operation can report ends up as one of these
//! variants, each pinned to a single HTTP status. Raw driver messages never
//! make it into a variant; see [`crate::db::guard`] for the translation.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Persistence layer unreachable or faulted internally.
    #[error("{0}")]
    Database(String),
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),
    /// Lookup by primary key found no row. Carries the resource name.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Constraint violation (foreign key, uniqueness, check).
    #[error("{0}")]
    Conflict(String),
    /// Connectivity fault that escaped the per-operation translators.
    #[error("Database service unavailable")]
    Unavailable,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
        }
    }
}

/// JSON shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), axum::Json(self.body())).into_response()
    }
}
