//! Integration tests against a real PostgreSQL database.
//!
//! Run with `FILO_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Each test truncates the `files` table, so point it at a scratch database.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use sqlx::PgPool;

use filo_core::config::AppConfig;
use filo_core::error::ErrorKind;
use filo_core::types::PageRequest;
use filo_database::{FileRecordStore, FileRepository, MemoryFileRecordStore, migration};
use filo_entity::file::{FileKey, FileRecordFilter, NewFileRecord};

async fn test_pool() -> PgPool {
    let url = std::env::var("FILO_TEST_DATABASE_URL")
        .expect("FILO_TEST_DATABASE_URL must be set for PostgreSQL tests");
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    migration::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    sqlx::query("TRUNCATE files RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean files table");
    pool
}

fn new_record(dir: &str, name: &str) -> NewFileRecord {
    NewFileRecord {
        directory_path: dir.to_string(),
        filename: name.to_string(),
        file_type: "file".to_string(),
        size: 1,
        checksum: "x".to_string(),
        registered_at: chrono::Utc::now(),
    }
}

#[tokio::test]
#[ignore = "requires FILO_TEST_DATABASE_URL"]
async fn test_repository_insert_conflict_and_rollback() {
    let repo = FileRepository::new(test_pool().await);

    let mut tx = repo.begin().await.expect("begin");
    let created = tx.insert(&new_record("/d", "a")).await.expect("insert");
    tx.commit().await.expect("commit");
    assert_eq!(created.id.get(), 1);

    let mut tx = repo.begin().await.expect("begin");
    let err = tx
        .insert(&new_record("/d", "a"))
        .await
        .expect_err("duplicate key");
    assert_eq!(err.kind, ErrorKind::Conflict);
    drop(tx);

    {
        let mut tx = repo.begin().await.expect("begin");
        tx.insert(&new_record("/d", "rolled-back"))
            .await
            .expect("insert");
    }
    assert!(
        repo.find_by_key(&FileKey::new("/d", "rolled-back"))
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
#[ignore = "requires FILO_TEST_DATABASE_URL"]
async fn test_repository_filters_and_windows() {
    let repo = FileRepository::new(test_pool().await);
    for name in ["a", "b", "c", "d"] {
        let mut tx = repo.begin().await.expect("begin");
        tx.insert(&new_record("/d", name)).await.expect("insert");
        tx.commit().await.expect("commit");
    }

    let filter = FileRecordFilter::new(Some("/d".to_string()), None, None);
    assert_eq!(repo.count(&filter).await.expect("count"), 4);

    let page = repo
        .list(&filter, &PageRequest::new(2, 1))
        .await
        .expect("list");
    let names: Vec<_> = page.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["b", "c"]);

    assert!(repo.delete_by_key(&FileKey::new("/d", "a")).await.expect("delete"));
    assert!(!repo.delete_by_key(&FileKey::new("/d", "a")).await.expect("delete"));
    repo.ping().await.expect("ping");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires FILO_TEST_DATABASE_URL"]
async fn test_api_over_postgres_never_duplicates_a_key() {
    let store = Arc::new(FileRepository::new(test_pool().await));
    let app = helpers::TestApp::with_store(
        AppConfig::default(),
        store.clone(),
        MemoryFileRecordStore::new(),
    );

    let requests = (0..8).map(|i| app.register("/d", "same", i, "x"));
    let responses = futures::future::join_all(requests).await;
    for response in &responses {
        assert!(
            matches!(
                response.status,
                StatusCode::CREATED | StatusCode::OK | StatusCode::CONFLICT
            ),
            "unexpected status {}",
            response.status
        );
    }

    let filter = FileRecordFilter::default();
    assert_eq!(store.count(&filter).await.expect("count"), 1);

    let listed = app.request("GET", "/files?directory_path=/d", None).await;
    assert_eq!(listed.body["total"], 1);
}
