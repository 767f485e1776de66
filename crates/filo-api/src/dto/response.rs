//! Response DTOs.

use serde::{Deserialize, Serialize};

use filo_core::types::PageResponse;
use filo_entity::file::FileRecord;

/// Body of `GET /files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Records on this page, ordered by id.
    pub files: Vec<FileRecord>,
    /// Number of records matching the filters before paging.
    pub total: u64,
}

impl From<PageResponse<FileRecord>> for FileListResponse {
    fn from(page: PageResponse<FileRecord>) -> Self {
        Self {
            files: page.items,
            total: page.total,
        }
    }
}

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Probe outcome.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
