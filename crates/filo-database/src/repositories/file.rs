//! PostgreSQL file record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use filo_core::error::{AppError, ErrorKind};
use filo_core::result::AppResult;
use filo_core::types::{FileRecordId, PageRequest};
use filo_entity::file::{FileKey, FileRecord, FileRecordFilter, NewFileRecord};

use crate::connection;
use crate::store::{FileRecordStore, FileRecordTransaction};

/// Name of the unique constraint over `(directory_path, filename)`.
pub const FILES_KEY_CONSTRAINT: &str = "files_directory_path_filename_key";

const SELECT_FILES: &str = "SELECT id, directory_path, filename, file_type, size, checksum, \
                            created_at, updated_at FROM files";

const RETURNING_FILE: &str =
    "RETURNING id, directory_path, filename, file_type, size, checksum, created_at, updated_at";

/// Repository for the `files` table.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for FileRepository {
    async fn begin(&self) -> AppResult<Box<dyn FileRecordTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgFileTransaction { tx }))
    }

    async fn find_by_id(&self, id: FileRecordId) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!("{SELECT_FILES} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_key(&self, key: &FileKey) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "{SELECT_FILES} WHERE directory_path = $1 AND filename = $2"
        ))
        .bind(&key.directory_path)
        .bind(&key.filename)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file by key", e))
    }

    async fn count(&self, filter: &FileRecordFilter) -> AppResult<u64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM files");
        push_filter(&mut query, filter);

        let total: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(total.max(0) as u64)
    }

    async fn list(
        &self,
        filter: &FileRecordFilter,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_FILES);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        query
            .build_query_as::<FileRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn delete_by_key(&self, key: &FileKey) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE directory_path = $1 AND filename = $2")
            .bind(&key.directory_path)
            .bind(&key.filename)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        connection::ping(&self.pool).await
    }
}

/// A PostgreSQL transaction; sqlx rolls it back when dropped uncommitted.
struct PgFileTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl FileRecordTransaction for PgFileTransaction {
    async fn find_by_key(&mut self, key: &FileKey) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "{SELECT_FILES} WHERE directory_path = $1 AND filename = $2 FOR UPDATE"
        ))
        .bind(&key.directory_path)
        .bind(&key.filename)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock file by key", e))
    }

    async fn insert(&mut self, record: &NewFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "INSERT INTO files (directory_path, filename, file_type, size, checksum, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) {RETURNING_FILE}"
        ))
        .bind(&record.directory_path)
        .bind(&record.filename)
        .bind(&record.file_type)
        .bind(record.size)
        .bind(&record.checksum)
        .bind(record.registered_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(FILES_KEY_CONSTRAINT)
                    || db_err.is_unique_violation() =>
            {
                AppError::conflict(format!(
                    "File '{}' was registered concurrently",
                    record.key()
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file record", e),
        })
    }

    async fn update_contents(
        &mut self,
        id: FileRecordId,
        size: i64,
        checksum: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(&format!(
            "UPDATE files SET size = $2, checksum = $3, updated_at = $4 WHERE id = $1 {RETURNING_FILE}"
        ))
        .bind(id)
        .bind(size)
        .bind(checksum)
        .bind(updated_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file record", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

/// Append the `WHERE` clause for every present filter field.
fn push_filter<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a FileRecordFilter) {
    let conditions = [
        ("directory_path", filter.directory_path.as_deref()),
        ("filename", filter.filename.as_deref()),
        ("checksum", filter.checksum.as_deref()),
    ];

    let mut keyword = " WHERE ";
    for (column, value) in conditions {
        if let Some(value) = value {
            query.push(keyword).push(column).push(" = ").push_bind(value);
            keyword = " AND ";
        }
    }
}
