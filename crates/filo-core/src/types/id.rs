//! Typed surrogate identifier for file records.
//!
//! The store assigns ids on creation from a monotonically increasing
//! sequence; ids are never reused, even after deletion. When the `sqlx`
//! feature is enabled the type maps transparently onto PostgreSQL `BIGINT`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct FileRecordId(pub i64);

impl FileRecordId {
    /// Wrap a raw id value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw id value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FileRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileRecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl From<i64> for FileRecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<FileRecordId> for i64 {
    fn from(id: FileRecordId) -> i64 {
        id.0
    }
}
