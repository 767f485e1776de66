//! Health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use filo_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /livez
pub async fn livez() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok"))
}

/// GET /readyz
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.registry.ping().await.map_err(|e| {
        warn!(error = %e, "Readiness check failed");
        AppError::service_unavailable("Store is unreachable")
    })?;
    Ok(Json(HealthResponse::new("ready")))
}
