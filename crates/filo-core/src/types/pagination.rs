//! Limit/offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::error::AppError;

/// A validated `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of matching rows to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Create a page request without bounds checking.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Build a page request from raw caller input.
    ///
    /// Missing values fall back to the configured default limit and offset
    /// zero. Negative values are rejected. An explicit limit is used as is.
    pub fn from_params(
        limit: Option<i64>,
        offset: Option<i64>,
        config: &RegistryConfig,
    ) -> Result<Self, AppError> {
        let limit = match limit {
            None => config.default_list_limit,
            Some(l) if l < 0 => {
                return Err(AppError::validation(format!(
                    "limit must be non-negative, got {l}"
                )));
            }
            Some(l) => l as u64,
        };

        let offset = match offset {
            None => 0,
            Some(o) if o < 0 => {
                return Err(AppError::validation(format!(
                    "offset must be non-negative, got {o}"
                )));
            }
            Some(o) => o as u64,
        };

        Ok(Self { limit, offset })
    }

    /// The SQL `LIMIT` value.
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// The SQL `OFFSET` value.
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: RegistryConfig::default().default_list_limit,
            offset: 0,
        }
    }
}

/// One page of results plus the number of rows matching before paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// The limit that produced this page.
    pub limit: u64,
    /// The offset that produced this page.
    pub offset: u64,
}

impl<T> PageResponse<T> {
    /// Create a page from its items and the unpaged total.
    pub fn new(items: Vec<T>, total: u64, page: &PageRequest) -> Self {
        Self {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}
