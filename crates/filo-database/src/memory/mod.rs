//! In-memory file record store.

pub mod store;

pub use store::MemoryFileRecordStore;
