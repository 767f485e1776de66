//! File registry service: the upsert, query and delete logic.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use validator::Validate;

use filo_core::config::RegistryConfig;
use filo_core::error::{AppError, ErrorKind};
use filo_core::result::AppResult;
use filo_core::types::{FileRecordId, PageRequest, PageResponse};
use filo_database::store::FileRecordStore;
use filo_entity::file::{FileKey, FileRecord, FileRecordFilter, NewFileRecord};

use super::metrics::RegistryMetrics;
use super::validation;

/// Facts reported by an agent about one file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterFile {
    /// Directory the file lives in.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub directory_path: String,
    /// Name of the file.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub filename: String,
    /// Free-form classification, only used on creation.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub file_type: String,
    /// Size in bytes; zero when absent.
    #[validate(range(min = 0, message = "must be non-negative"))]
    pub size: Option<i64>,
    /// Caller-supplied digest.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub checksum: String,
}

impl RegisterFile {
    fn key(&self) -> FileKey {
        FileKey::new(&self.directory_path, &self.filename)
    }
}

/// Filters and paging for a list query, as received from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFiles {
    pub directory_path: Option<String>,
    pub filename: Option<String>,
    pub checksum: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Whether a registration created a record or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterOutcome {
    Created,
    Updated,
}

/// The stored record after a registration and how it got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub record: FileRecord,
    pub outcome: RegisterOutcome,
}

/// The file registry.
///
/// Holds no state between calls beyond the injected store and counters.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    /// Durable record storage.
    store: Arc<dyn FileRecordStore>,
    /// Paging defaults and limits.
    config: RegistryConfig,
    /// Process-wide counters.
    metrics: Arc<RegistryMetrics>,
}

impl FileRegistry {
    /// Creates a new file registry.
    pub fn new(
        store: Arc<dyn FileRecordStore>,
        config: RegistryConfig,
        metrics: Arc<RegistryMetrics>,
    ) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    /// The counters this registry reports into.
    pub fn metrics(&self) -> &Arc<RegistryMetrics> {
        &self.metrics
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// Create a record for an unseen key, or refresh size, checksum and
    /// `updated_at` of the existing one.
    ///
    /// Lookup and write share one store transaction. If another
    /// registration creates the same key between them, the insert is
    /// rejected and this returns `ErrorKind::Conflict`.
    pub async fn register(&self, input: RegisterFile) -> AppResult<Registration> {
        validation::validate_register(&input)?;
        let key = input.key();

        match self.upsert(input).await {
            Ok(registration) => {
                match registration.outcome {
                    RegisterOutcome::Created => {
                        self.metrics.inc_created();
                        info!(id = %registration.record.id, key = %key, "File registered");
                    }
                    RegisterOutcome::Updated => {
                        self.metrics.inc_updated();
                        info!(
                            id = %registration.record.id,
                            key = %key,
                            size = registration.record.size,
                            "File registration refreshed"
                        );
                    }
                }
                Ok(registration)
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                self.metrics.inc_conflicts();
                warn!(key = %key, "Concurrent registration of the same file");
                Err(e)
            }
            Err(e) => Err(self.store_failure("register", &key, e)),
        }
    }

    async fn upsert(&self, input: RegisterFile) -> AppResult<Registration> {
        let key = input.key();
        let now = Utc::now().trunc_subsecs(6);
        let size = input.size.unwrap_or(0);

        let mut tx = self.store.begin().await?;
        let registration = match tx.find_by_key(&key).await? {
            Some(existing) => {
                let updated_at = next_updated_at(existing.updated_at, now);
                let record = tx
                    .update_contents(existing.id, size, &input.checksum, updated_at)
                    .await?;
                Registration {
                    record,
                    outcome: RegisterOutcome::Updated,
                }
            }
            None => {
                let record = tx
                    .insert(&NewFileRecord {
                        directory_path: input.directory_path,
                        filename: input.filename,
                        file_type: input.file_type,
                        size,
                        checksum: input.checksum,
                        registered_at: now,
                    })
                    .await?;
                Registration {
                    record,
                    outcome: RegisterOutcome::Created,
                }
            }
        };
        tx.commit().await?;

        Ok(registration)
    }

    /// List records matching every present filter, ordered by id.
    pub async fn list(&self, query: ListFiles) -> AppResult<PageResponse<FileRecord>> {
        let page = PageRequest::from_params(query.limit, query.offset, &self.config)?;
        let filter = FileRecordFilter::new(query.directory_path, query.filename, query.checksum);

        let result = async {
            let total = self.store.count(&filter).await?;
            let items = self.store.list(&filter, &page).await?;
            Ok::<_, AppError>(PageResponse::new(items, total, &page))
        }
        .await;

        result.map_err(|e| self.store_failure("list", &filter_description(&filter), e))
    }

    /// Fetch one record by id.
    pub async fn get_by_id(&self, id: FileRecordId) -> AppResult<FileRecord> {
        match self.store.find_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                debug!(id = %id, "File lookup missed");
                Err(AppError::not_found(format!("File {id} not found")))
            }
            Err(e) => Err(self.store_failure("get_by_id", &id, e)),
        }
    }

    /// Delete the record stored under `key`.
    pub async fn delete(&self, key: FileKey) -> AppResult<()> {
        validation::validate_key(&key)?;

        match self.store.delete_by_key(&key).await {
            Ok(true) => {
                self.metrics.inc_deleted();
                info!(key = %key, "File deleted");
                Ok(())
            }
            Ok(false) => {
                debug!(key = %key, "Delete matched no file");
                Err(AppError::not_found(format!("File '{key}' not found")))
            }
            Err(e) => Err(self.store_failure("delete", &key, e)),
        }
    }

    /// Count and log a failed store call.
    fn store_failure(
        &self,
        operation: &'static str,
        subject: &dyn std::fmt::Display,
        err: AppError,
    ) -> AppError {
        if err.kind == ErrorKind::Database {
            self.metrics.inc_store_errors();
            error!(operation, subject = %subject, error = ?err, "Store operation failed");
        }
        err
    }
}

/// `updated_at` for a refresh: `now`, unless the clock has not moved past
/// the stored value.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn filter_description(filter: &FileRecordFilter) -> String {
    format!(
        "directory_path={:?} filename={:?} checksum={:?}",
        filter.directory_path, filter.filename, filter.checksum
    )
}
