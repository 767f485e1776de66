//! The persistence contract the file registry is written against.
//!
//! Every lookup reports absence as `None` (or `false` for deletes) so that
//! callers can tell "not found" apart from a failing store. Failures are
//! `ErrorKind::Database`, except a duplicate composite key on insert, which
//! is `ErrorKind::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use filo_core::result::AppResult;
use filo_core::types::{FileRecordId, PageRequest};
use filo_entity::file::{FileKey, FileRecord, FileRecordFilter, NewFileRecord};

/// Durable storage for file records.
#[async_trait]
pub trait FileRecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Open a transaction for a read-then-write sequence.
    ///
    /// Dropping the returned handle without calling
    /// [`FileRecordTransaction::commit`] rolls back every write made
    /// through it.
    async fn begin(&self) -> AppResult<Box<dyn FileRecordTransaction>>;

    /// Find a record by its surrogate id.
    async fn find_by_id(&self, id: FileRecordId) -> AppResult<Option<FileRecord>>;

    /// Find a record by its composite key.
    async fn find_by_key(&self, key: &FileKey) -> AppResult<Option<FileRecord>>;

    /// Count records matching `filter`.
    async fn count(&self, filter: &FileRecordFilter) -> AppResult<u64>;

    /// Fetch one window of records matching `filter`, ordered by id.
    async fn list(&self, filter: &FileRecordFilter, page: &PageRequest)
    -> AppResult<Vec<FileRecord>>;

    /// Delete the record at `key`. Returns `true` if a row was removed.
    async fn delete_by_key(&self, key: &FileKey) -> AppResult<bool>;

    /// Check that the store is reachable.
    async fn ping(&self) -> AppResult<()>;
}

/// A scoped unit of work against a [`FileRecordStore`].
#[async_trait]
pub trait FileRecordTransaction: Send {
    /// Find a record by composite key, holding it against concurrent writers
    /// until the transaction ends.
    async fn find_by_key(&mut self, key: &FileKey) -> AppResult<Option<FileRecord>>;

    /// Insert a new record. Fails with `ErrorKind::Conflict` when the
    /// composite key is already taken.
    async fn insert(&mut self, record: &NewFileRecord) -> AppResult<FileRecord>;

    /// Overwrite the mutable fields of an existing record.
    async fn update_contents(
        &mut self,
        id: FileRecordId,
        size: i64,
        checksum: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<FileRecord>;

    /// Make every write in this transaction durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
