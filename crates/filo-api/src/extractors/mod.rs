//! Extractors whose rejections are reported as `VALIDATION_ERROR` bodies.

pub mod json;
pub mod path;
pub mod query;

pub use json::ApiJson;
pub use path::ApiPath;
pub use query::ApiQuery;
