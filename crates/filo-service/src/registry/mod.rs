//! The file registry: upsert, list, lookup and delete of file records.

pub mod metrics;
pub mod service;
pub mod validation;

pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use service::{FileRegistry, ListFiles, RegisterFile, RegisterOutcome, Registration};
