//! # filo-api
//!
//! HTTP API layer for Filo built on Axum.
//!
//! Exposes the file registry under `/files`, liveness and readiness probes,
//! and Prometheus counters under `/metrics`, together with the middleware
//! stack (request ids, request logging, CORS, security headers, timeouts)
//! and the mapping from `AppError` to JSON error responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
