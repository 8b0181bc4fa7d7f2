//! Last line of defense at the service boundary.
//!
//! Faults that slip past the per-operation decorators are mapped by
//! `From<Fault> for ApiError`; what is left here covers handler panics,
//! requests no route matches and methods a route does not serve.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faitness::error::{ApiError, ErrorBody};
use log::error;

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

fn plain_error(status: StatusCode, detail: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
}

pub async fn unknown_route() -> (StatusCode, Json<ErrorBody>) {
    plain_error(StatusCode::NOT_FOUND, "Not found")
}

/// Known path, but no handler for the request method.
pub async fn unsupported_method() -> (StatusCode, Json<ErrorBody>) {
    plain_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
