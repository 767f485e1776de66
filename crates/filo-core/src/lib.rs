//! # filo-core
//!
//! Core crate for Filo, the file metadata registry. Contains configuration
//! schemas, the typed record identifier, the list window used for
//! pagination, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Filo crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
