//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use filo_api::{AppState, build_app};
use filo_core::config::AppConfig;
use filo_database::{FileRecordStore, MemoryFileRecordStore};

/// Test application over the in-memory store
pub struct TestApp {
    /// The full application, middleware included
    pub router: Router,
    /// Handle on the store behind the router
    pub store: MemoryFileRecordStore,
    /// Shared state, for inspecting counters
    pub state: AppState,
}

/// A collected response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    /// Parsed JSON body, `Null` when the body is empty or not JSON
    pub body: Value,
}

impl TestApp {
    /// Create a test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryFileRecordStore::new();
        Self::with_store(config, Arc::new(store.clone()), store)
    }

    /// Create a test application over an arbitrary store
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn FileRecordStore>,
        memory: MemoryFileRecordStore,
    ) -> Self {
        let state = AppState::new(config, store);
        Self {
            router: build_app(state.clone()),
            store: memory,
            state,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body).await
    }

    /// Make an HTTP request with a verbatim body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Register a file through the API
    pub async fn register(
        &self,
        directory_path: &str,
        filename: &str,
        size: i64,
        checksum: &str,
    ) -> TestResponse {
        self.request(
            "POST",
            "/files",
            Some(json!({
                "directory_path": directory_path,
                "filename": filename,
                "file_type": "file",
                "size": size,
                "checksum": checksum,
            })),
        )
        .await
    }
}
