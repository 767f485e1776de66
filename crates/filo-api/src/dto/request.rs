//! Request DTOs.

use serde::{Deserialize, Serialize};

use filo_entity::file::FileKey;
use filo_service::registry::{ListFiles, RegisterFile};

/// Body of `POST /files`.
///
/// Missing strings deserialize as empty so that the registry's validation
/// reports every offending field at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterFileRequest {
    pub directory_path: String,
    pub filename: String,
    pub file_type: String,
    pub size: Option<i64>,
    pub checksum: String,
}

impl From<RegisterFileRequest> for RegisterFile {
    fn from(req: RegisterFileRequest) -> Self {
        Self {
            directory_path: req.directory_path,
            filename: req.filename,
            file_type: req.file_type,
            size: req.size,
            checksum: req.checksum,
        }
    }
}

/// Query string of `GET /files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFilesQuery {
    pub directory_path: Option<String>,
    pub filename: Option<String>,
    pub checksum: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ListFilesQuery> for ListFiles {
    fn from(query: ListFilesQuery) -> Self {
        Self {
            directory_path: query.directory_path,
            filename: query.filename,
            checksum: query.checksum,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

/// Query string of `DELETE /files`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteFileQuery {
    pub directory_path: Option<String>,
    pub filename: Option<String>,
}

impl From<DeleteFileQuery> for FileKey {
    fn from(query: DeleteFileQuery) -> Self {
        FileKey::new(
            query.directory_path.unwrap_or_default(),
            query.filename.unwrap_or_default(),
        )
    }
}
