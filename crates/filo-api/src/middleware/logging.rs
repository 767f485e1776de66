//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info, info_span};

use crate::middleware::request_id::request_id;
use crate::state::AppState;

/// Logs method, path, status, duration and request id, and counts the
/// request.
pub async fn request_logging(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let id = request_id(request.headers()).to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    state.metrics().inc_http_requests();
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %id,
        "HTTP request"
    );

    response
}

/// Span for `TraceLayer`, tagged with the request id.
pub fn make_request_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}
