//! Integration tests for the file registry endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use filo_core::config::AppConfig;

#[tokio::test]
async fn test_register_creates_then_updates() {
    let app = helpers::TestApp::new();

    let created = app.register("/var/data", "a.txt", 100, "abc").await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 1);
    assert_eq!(created.body["directory_path"], "/var/data");
    assert_eq!(created.body["filename"], "a.txt");
    assert_eq!(created.body["file_type"], "file");
    assert_eq!(created.body["size"], 100);
    assert_eq!(created.body["checksum"], "abc");
    assert_eq!(created.body["createdAt"], created.body["updatedAt"]);

    let updated = app.register("/var/data", "a.txt", 150, "def").await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], 1);
    assert_eq!(updated.body["size"], 150);
    assert_eq!(updated.body["checksum"], "def");
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);
    assert_ne!(updated.body["updatedAt"], created.body["updatedAt"]);

    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_without_size_defaults_to_zero() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/files",
            Some(json!({
                "directory_path": "/d",
                "filename": "a",
                "file_type": "file",
                "checksum": "x",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["size"], 0);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = helpers::TestApp::new();

    let missing = app
        .request(
            "POST",
            "/files",
            Some(json!({ "directory_path": "/d", "filename": "a", "file_type": "file" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["error"], "VALIDATION_ERROR");
    assert_eq!(missing.body["message"], "checksum must not be empty");

    let negative = app.register("/d", "a", -5, "x").await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.body["error"], "VALIDATION_ERROR");

    let malformed = app
        .raw_request("POST", "/files", "{not json".to_string())
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "VALIDATION_ERROR");

    let wrong_type = app
        .request(
            "POST",
            "/files",
            Some(json!({
                "directory_path": "/d",
                "filename": "a",
                "file_type": "file",
                "size": "big",
                "checksum": "x",
            })),
        )
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_list_returns_files_and_total() {
    let app = helpers::TestApp::new();
    for i in 0..5 {
        app.register("/d", &format!("f{i}"), i, "x").await;
    }

    let all = app.request("GET", "/files", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["total"], 5);
    let ids: Vec<i64> = all.body["files"]
        .as_array()
        .expect("files array")
        .iter()
        .map(|f| f["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let window = app.request("GET", "/files?limit=2&offset=3", None).await;
    assert_eq!(window.body["total"], 5);
    let names: Vec<&str> = window.body["files"]
        .as_array()
        .expect("files array")
        .iter()
        .map(|f| f["filename"].as_str().expect("filename"))
        .collect();
    assert_eq!(names, vec!["f3", "f4"]);

    let past_end = app.request("GET", "/files?offset=10", None).await;
    assert_eq!(past_end.status, StatusCode::OK);
    assert_eq!(past_end.body["files"], json!([]));
    assert_eq!(past_end.body["total"], 5);
}

#[tokio::test]
async fn test_list_filters_are_conjunctive() {
    let app = helpers::TestApp::new();
    app.register("/a", "x", 1, "c1").await;
    app.register("/a", "y", 1, "c2").await;
    app.register("/b", "x", 1, "c1").await;

    let by_dir = app.request("GET", "/files?directory_path=/a", None).await;
    assert_eq!(by_dir.body["total"], 2);

    let both = app
        .request("GET", "/files?filename=x&checksum=c1", None)
        .await;
    assert_eq!(both.body["total"], 2);

    let narrow = app
        .request("GET", "/files?directory_path=/b&filename=x&checksum=c1", None)
        .await;
    assert_eq!(narrow.body["total"], 1);
    assert_eq!(narrow.body["files"][0]["id"], 3);

    let empty_filter = app.request("GET", "/files?checksum=", None).await;
    assert_eq!(empty_filter.body["total"], 3);
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let app = helpers::TestApp::new();

    let negative = app.request("GET", "/files?limit=-1", None).await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.body["error"], "VALIDATION_ERROR");

    let not_a_number = app.request("GET", "/files?offset=abc", None).await;
    assert_eq!(not_a_number.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_a_number.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_uses_default_limit_but_never_caps_explicit_one() {
    let mut config = AppConfig::default();
    config.registry.default_list_limit = 2;
    let app = helpers::TestApp::with_config(config);
    for i in 0..1100 {
        app.register("/d", &format!("f{i:04}"), i, "x").await;
    }

    let defaulted = app.request("GET", "/files", None).await;
    assert_eq!(defaulted.body["files"].as_array().expect("files").len(), 2);

    let large = app.request("GET", "/files?limit=5000", None).await;
    assert_eq!(large.status, StatusCode::OK);
    assert_eq!(large.body["files"].as_array().expect("files").len(), 1100);
    assert_eq!(large.body["total"], 1100);

    let past_thousand = app
        .request("GET", "/files?limit=1050&offset=50", None)
        .await;
    assert_eq!(past_thousand.body["files"].as_array().expect("files").len(), 1050);
    assert_eq!(past_thousand.body["files"][0]["id"], 51);
}

#[tokio::test]
async fn test_get_by_id() {
    let app = helpers::TestApp::new();
    app.register("/var/data", "a.txt", 100, "abc").await;

    let found = app.request("GET", "/files/1", None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["filename"], "a.txt");

    let missing = app.request("GET", "/files/999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");

    let malformed = app.request("GET", "/files/abc", None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = helpers::TestApp::new();
    app.register("/var/data", "a.txt", 100, "abc").await;

    let deleted = app
        .request("DELETE", "/files?directory_path=/var/data&filename=a.txt", None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.text.is_empty());

    let again = app
        .request("DELETE", "/files?directory_path=/var/data&filename=a.txt", None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], "NOT_FOUND");

    let gone = app.request("GET", "/files/1", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_both_key_parts() {
    let app = helpers::TestApp::new();

    let response = app
        .request("DELETE", "/files?directory_path=/var/data", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "filename must not be empty");
}

#[tokio::test]
async fn test_reregistration_after_delete_gets_new_id() {
    let app = helpers::TestApp::new();
    app.register("/d", "a", 1, "x").await;
    app.request("DELETE", "/files?directory_path=/d&filename=a", None)
        .await;

    let recreated = app.register("/d", "a", 2, "y").await;
    assert_eq!(recreated.status, StatusCode::CREATED);
    assert_eq!(recreated.body["id"], 2);
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = helpers::TestApp::new();
    app.store.set_offline(true);

    let response = app.register("/d", "a", 1, "x").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "INTERNAL_ERROR");
    assert_eq!(response.body["message"], "Internal server error");

    let lookup = app.request("GET", "/files/1", None).await;
    assert_eq!(lookup.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_of_one_key() {
    let app = helpers::TestApp::new();

    let requests = (0..12).map(|i| app.register("/d", "same", i, "x"));
    let responses = futures::future::join_all(requests).await;

    let created = responses
        .iter()
        .filter(|r| r.status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    assert!(responses.iter().all(|r| r.body["id"] == 1));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/files", None).await;
    let request_id = response
        .headers
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .expect("ascii");
    assert_eq!(request_id.len(), 36);
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "DENY");
    assert_eq!(response.headers["referrer-policy"], "no-referrer");
}
