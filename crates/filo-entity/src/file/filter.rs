//! Conjunctive filter for listing file records.

use serde::{Deserialize, Serialize};

use super::model::FileRecord;

/// Optional equality filters, combined with AND.
///
/// An absent field matches every record. Empty strings are normalized to
/// absent by [`FileRecordFilter::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecordFilter {
    /// Exact directory path.
    pub directory_path: Option<String>,
    /// Exact file name.
    pub filename: Option<String>,
    /// Exact checksum.
    pub checksum: Option<String>,
}

impl FileRecordFilter {
    /// Build a filter, treating empty strings as "no filter".
    pub fn new(
        directory_path: Option<String>,
        filename: Option<String>,
        checksum: Option<String>,
    ) -> Self {
        Self {
            directory_path: non_empty(directory_path),
            filename: non_empty(filename),
            checksum: non_empty(checksum),
        }
    }

    /// Whether no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.directory_path.is_none() && self.filename.is_none() && self.checksum.is_none()
    }

    /// Whether `record` satisfies every present field.
    pub fn matches(&self, record: &FileRecord) -> bool {
        field_matches(&self.directory_path, &record.directory_path)
            && field_matches(&self.filename, &record.filename)
            && field_matches(&self.checksum, &record.checksum)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn field_matches(expected: &Option<String>, actual: &str) -> bool {
    expected.as_deref().is_none_or(|e| e == actual)
}
