//! File registry handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use filo_core::types::FileRecordId;
use filo_entity::file::{FileKey, FileRecord};
use filo_service::registry::RegisterOutcome;

use crate::dto::request::{DeleteFileQuery, ListFilesQuery, RegisterFileRequest};
use crate::dto::response::FileListResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// POST /files
pub async fn register_file(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterFileRequest>,
) -> Result<(StatusCode, Json<FileRecord>), ApiError> {
    let registration = state.registry.register(req.into()).await?;
    let status = match registration.outcome {
        RegisterOutcome::Created => StatusCode::CREATED,
        RegisterOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(registration.record)))
}

/// GET /files?directory_path=&filename=&checksum=&limit=&offset=
pub async fn list_files(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListFilesQuery>,
) -> Result<Json<FileListResponse>, ApiError> {
    let page = state.registry.list(query.into()).await?;
    Ok(Json(page.into()))
}

/// GET /files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<FileRecordId>,
) -> Result<Json<FileRecord>, ApiError> {
    let record = state.registry.get_by_id(id).await?;
    Ok(Json(record))
}

/// DELETE /files?directory_path=&filename=
pub async fn delete_file(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DeleteFileQuery>,
) -> Result<StatusCode, ApiError> {
    state.registry.delete(FileKey::from(query)).await?;
    Ok(StatusCode::NO_CONTENT)
}
