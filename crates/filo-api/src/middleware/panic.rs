//! Turns a panicking handler into a 500 response.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use filo_core::error::AppError;

use crate::error::ApiError;

/// Response used by `CatchPanicLayer` when a handler panics. The panic
/// message is logged by [`ApiError`] and kept off the wire.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    ApiError::from(AppError::internal(format!("Handler panicked: {detail}"))).into_response()
}
