//! File record entities.

pub mod filter;
pub mod model;

pub use filter::FileRecordFilter;
pub use model::{FileKey, FileRecord, NewFileRecord};
