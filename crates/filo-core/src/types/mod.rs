//! Core type definitions used across the Filo workspace.

pub mod id;
pub mod pagination;

pub use id::FileRecordId;
pub use pagination::{PageRequest, PageResponse};
