//! File record entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filo_core::types::FileRecordId;

/// A file discovered by an agent and cataloged by the registry.
///
/// The JSON field names for the timestamps are camelCase because that is
/// what existing agents consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Surrogate identifier assigned by the store.
    pub id: FileRecordId,
    /// Directory the file lives in.
    pub directory_path: String,
    /// Name of the file inside `directory_path`.
    pub filename: String,
    /// Free-form classification, fixed at creation.
    pub file_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Caller-supplied digest of the file content.
    pub checksum: String,
    /// First registration of this key.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Most recent registration of this key.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// The composite natural key of this record.
    pub fn key(&self) -> FileKey {
        FileKey::new(&self.directory_path, &self.filename)
    }
}

/// The `(directory_path, filename)` pair that uniquely identifies a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileKey {
    /// Directory part of the key.
    pub directory_path: String,
    /// File name part of the key.
    pub filename: String,
}

impl FileKey {
    /// Create a key from its two parts.
    pub fn new(directory_path: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            directory_path: directory_path.into(),
            filename: filename.into(),
        }
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.directory_path, self.filename)
    }
}

/// Data required to insert a new file record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFileRecord {
    /// Directory the file lives in.
    pub directory_path: String,
    /// Name of the file.
    pub filename: String,
    /// Free-form classification.
    pub file_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Caller-supplied digest.
    pub checksum: String,
    /// Used for both `created_at` and `updated_at`.
    pub registered_at: DateTime<Utc>,
}

impl NewFileRecord {
    /// The composite key the new record will occupy.
    pub fn key(&self) -> FileKey {
        FileKey::new(&self.directory_path, &self.filename)
    }

    /// Materialize the record once the store has assigned an id.
    pub fn into_record(self, id: FileRecordId) -> FileRecord {
        FileRecord {
            id,
            directory_path: self.directory_path,
            filename: self.filename,
            file_type: self.file_type,
            size: self.size,
            checksum: self.checksum,
            created_at: self.registered_at,
            updated_at: self.registered_at,
        }
    }
}
