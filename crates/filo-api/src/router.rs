//! Route definitions for the Filo HTTP API.

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(file_routes())
        .merge(health_routes())
        .with_state(state)
}

/// File registry endpoints: register, list, lookup, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::files::list_files)
                .post(handlers::files::register_file)
                .delete(handlers::files::delete_file),
        )
        .route("/files/{id}", get(handlers::files::get_file))
}

/// Probes and metrics
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/livez", get(handlers::health::livez))
        .route("/readyz", get(handlers::health::readyz))
        .route("/metrics", get(handlers::metrics::metrics))
}
