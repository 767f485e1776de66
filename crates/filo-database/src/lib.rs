//! # filo-database
//!
//! Persistence for the Filo registry: the store contract the registry is
//! written against, the PostgreSQL implementation with its connection pool
//! and migrations, and an in-memory implementation for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryFileRecordStore;
pub use repositories::FileRepository;
pub use store::{FileRecordStore, FileRecordTransaction};
