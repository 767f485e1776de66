//! In-memory implementation of [`FileRecordStore`].
//!
//! All state sits behind one tokio mutex. A transaction holds the lock for
//! its whole lifetime, so read-then-write sequences are serialized exactly
//! like a `SELECT ... FOR UPDATE` would serialize them on a single key.
//! Writes are recorded in an undo log and reverted if the transaction is
//! dropped before it commits.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use filo_core::error::AppError;
use filo_core::result::AppResult;
use filo_core::types::{FileRecordId, PageRequest};
use filo_entity::file::{FileKey, FileRecord, FileRecordFilter, NewFileRecord};

use crate::store::{FileRecordStore, FileRecordTransaction};

#[derive(Debug, Default)]
struct MemoryState {
    /// Last id handed out. Never decremented, so ids are not reused.
    last_id: i64,
    /// Records ordered by id, which is the natural listing order.
    records: BTreeMap<FileRecordId, FileRecord>,
    /// Unique index over the composite key.
    keys: HashMap<FileKey, FileRecordId>,
}

impl MemoryState {
    fn find_by_key(&self, key: &FileKey) -> Option<FileRecord> {
        self.keys
            .get(key)
            .and_then(|id| self.records.get(id))
            .cloned()
    }
}

/// In-memory file record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRecordStore {
    state: Arc<Mutex<MemoryState>>,
    offline: Arc<AtomicBool>,
}

impl MemoryFileRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a database error, the way
    /// a store with a dropped connection would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::database("In-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl FileRecordStore for MemoryFileRecordStore {
    async fn begin(&self) -> AppResult<Box<dyn FileRecordTransaction>> {
        self.check_online()?;
        let state = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryTransaction {
            state,
            undo: Vec::new(),
            committed: false,
        }))
    }

    async fn find_by_id(&self, id: FileRecordId) -> AppResult<Option<FileRecord>> {
        self.check_online()?;
        Ok(self.state.lock().await.records.get(&id).cloned())
    }

    async fn find_by_key(&self, key: &FileKey) -> AppResult<Option<FileRecord>> {
        self.check_online()?;
        Ok(self.state.lock().await.find_by_key(key))
    }

    async fn count(&self, filter: &FileRecordFilter) -> AppResult<u64> {
        self.check_online()?;
        let state = self.state.lock().await;
        Ok(state.records.values().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn list(
        &self,
        filter: &FileRecordFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        self.check_online()?;
        let state = self.state.lock().await;
        Ok(state
            .records
            .values()
            .filter(|r| filter.matches(r))
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn delete_by_key(&self, key: &FileKey) -> AppResult<bool> {
        self.check_online()?;
        let mut state = self.state.lock().await;
        match state.keys.remove(key) {
            Some(id) => {
                state.records.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_online()
    }
}

enum Undo {
    Inserted(FileRecordId),
    Updated(FileRecord),
}

struct MemoryTransaction {
    state: OwnedMutexGuard<MemoryState>,
    undo: Vec<Undo>,
    committed: bool,
}

#[async_trait]
impl FileRecordTransaction for MemoryTransaction {
    async fn find_by_key(&mut self, key: &FileKey) -> AppResult<Option<FileRecord>> {
        Ok(self.state.find_by_key(key))
    }

    async fn insert(&mut self, record: &NewFileRecord) -> AppResult<FileRecord> {
        let key = record.key();
        if self.state.keys.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "File '{key}' was registered concurrently"
            )));
        }

        self.state.last_id += 1;
        let id = FileRecordId(self.state.last_id);
        let created = record.clone().into_record(id);

        self.state.keys.insert(key, id);
        self.state.records.insert(id, created.clone());
        self.undo.push(Undo::Inserted(id));
        Ok(created)
    }

    async fn update_contents(
        &mut self,
        id: FileRecordId,
        size: i64,
        checksum: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<FileRecord> {
        let record = self
            .state
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        let previous = record.clone();
        record.size = size;
        record.checksum = checksum.to_string();
        record.updated_at = updated_at;
        let updated = record.clone();

        self.undo.push(Undo::Updated(previous));
        Ok(updated)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut tx = self;
        tx.committed = true;
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if self.committed || self.undo.is_empty() {
            return;
        }

        debug!(writes = self.undo.len(), "Rolling back uncommitted in-memory transaction");
        while let Some(op) = self.undo.pop() {
            match op {
                Undo::Inserted(id) => {
                    if let Some(record) = self.state.records.remove(&id) {
                        self.state.keys.remove(&record.key());
                    }
                }
                Undo::Updated(previous) => {
                    self.state.records.insert(previous.id, previous);
                }
            }
        }
    }
}
