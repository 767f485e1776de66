//! # filo-service
//!
//! Business logic for the Filo file registry. [`FileRegistry`] owns every
//! decision the service makes: create-vs-update on registration, filtering
//! and paging, point lookups and keyed deletes.
//!
//! Services follow constructor injection; the store arrives as an
//! `Arc<dyn FileRecordStore>` so tests can run against the in-memory store.

pub mod registry;

pub use registry::{
    FileRegistry, ListFiles, MetricsSnapshot, RegisterFile, RegisterOutcome, Registration,
    RegistryMetrics,
};
