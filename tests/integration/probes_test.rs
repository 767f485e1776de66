//! Integration tests for health probes and metrics.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_livez_is_always_ok() {
    let app = helpers::TestApp::new();
    app.store.set_offline(true);

    let response = app.request("GET", "/livez", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_readyz_follows_store_health() {
    let app = helpers::TestApp::new();

    let ready = app.request("GET", "/readyz", None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["status"], "ready");

    app.store.set_offline(true);
    let unready = app.request("GET", "/readyz", None).await;
    assert_eq!(unready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(unready.body["error"], "SERVICE_UNAVAILABLE");

    app.store.set_offline(false);
    let recovered = app.request("GET", "/readyz", None).await;
    assert_eq!(recovered.status, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_count_registry_activity() {
    let app = helpers::TestApp::new();
    app.register("/d", "a", 1, "x").await;
    app.register("/d", "a", 2, "y").await;
    app.register("/d", "b", 1, "x").await;
    app.request("DELETE", "/files?directory_path=/d&filename=b", None)
        .await;

    let response = app.request("GET", "/metrics", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers["content-type"]
            .to_str()
            .expect("ascii")
            .starts_with("text/plain")
    );

    let text = &response.text;
    assert!(text.contains("\nfilo_files_created_total 2\n"));
    assert!(text.contains("\nfilo_files_updated_total 1\n"));
    assert!(text.contains("\nfilo_files_deleted_total 1\n"));
    assert!(text.contains("\nfilo_register_conflicts_total 0\n"));
    assert!(text.contains("\nfilo_store_errors_total 0\n"));
    // The metrics request itself is counted after the body is rendered.
    assert!(text.contains("\nfilo_http_requests_total 4\n"));

    assert_eq!(app.state.metrics().snapshot().http_requests, 5);
}

#[tokio::test]
async fn test_metrics_count_store_errors() {
    let app = helpers::TestApp::new();
    app.store.set_offline(true);
    app.request("GET", "/files", None).await;

    let snapshot = app.state.metrics().snapshot();
    assert_eq!(snapshot.store_errors, 1);
    assert_eq!(snapshot.http_requests, 1);
}
