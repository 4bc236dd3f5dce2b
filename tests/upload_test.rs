use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use file_upload_server::config::ServerConfig;
use file_upload_server::services::file_service::FileService;
use file_upload_server::services::storage::LocalStorageService;
use file_upload_server::{AppState, create_app};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

fn setup_app() -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let config = ServerConfig::development(temp_dir.path());
    let storage = Arc::new(LocalStorageService::new(temp_dir.path()));
    let file_service = Arc::new(FileService::new(storage, config));
    (temp_dir, create_app(AppState::new(file_service)))
}

fn multipart_request(disposition: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{boundary}\r\n\
        Content-Disposition: form-data; {disposition}\r\n\
        Content-Type: application/octet-stream\r\n\r\n",
        boundary = BOUNDARY,
        disposition = disposition
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn upload_request(filename: &str, content: &[u8]) -> Request<Body> {
    multipart_request(
        &format!("name=\"file\"; filename=\"{}\"", filename),
        content,
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn stored_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_upload_sanitizes_and_classifies() {
    let (temp_dir, app) = setup_app();

    let response = app
        .oneshot(upload_request("My Holiday Photo.JPG", b"\x89PNG fake"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["original_name"], "My_Holiday_Photo.JPG");
    assert_eq!(json["type"], "Image");
    assert_eq!(json["size"], 9);

    let stored = json["filename"].as_str().unwrap();
    assert!(stored.ends_with("_My_Holiday_Photo.JPG"));
    assert_eq!(
        std::fs::read(temp_dir.path().join(stored)).unwrap(),
        b"\x89PNG fake"
    );
}

#[tokio::test]
async fn test_duplicate_names_are_kept_apart() {
    let (temp_dir, app) = setup_app();

    let mut stored = Vec::new();
    for content in [&b"first"[..], &b"second"[..]] {
        let response = app
            .clone()
            .oneshot(upload_request("report.pdf", content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        stored.push(json_body(response).await["filename"].as_str().unwrap().to_string());
    }

    assert_ne!(stored[0], stored[1]);
    assert_eq!(stored_count(temp_dir.path()), 2);
    assert_eq!(std::fs::read(temp_dir.path().join(&stored[0])).unwrap(), b"first");
    assert_eq!(std::fs::read(temp_dir.path().join(&stored[1])).unwrap(), b"second");
}

#[tokio::test]
async fn test_unsupported_type_is_rejected() {
    let (temp_dir, app) = setup_app();

    for filename in ["malware.exe", "noextension", "archive.tar.", "photo.heic"] {
        let response = app
            .clone()
            .oneshot(upload_request(filename, b"MZ content"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} accepted", filename);
        assert_eq!(json_body(response).await["error"], "Unsupported file type");
    }

    assert_eq!(stored_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_missing_or_empty_file_is_rejected() {
    let (temp_dir, app) = setup_app();

    // Plain form value, no file part at all
    let response = app
        .clone()
        .oneshot(multipart_request("name=\"description\"", b"hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No file selected");

    // Browser sends an empty filename when nothing was chosen
    let response = app
        .clone()
        .oneshot(upload_request("", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Not multipart at all
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(stored_count(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_empty_file_is_accepted() {
    let (_temp_dir, app) = setup_app();

    let response = app.oneshot(upload_request("empty.txt", b"")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["size"], 0);
}

#[tokio::test]
async fn test_file_over_max_size_is_rejected() {
    let (temp_dir, app) = setup_app();
    let max = ServerConfig::development(temp_dir.path()).max_upload_size;

    // Fits the transport limit, trips the per-file ceiling
    let content = vec![b'a'; max + 1];
    let response = app
        .clone()
        .oneshot(upload_request("big.zip", &content))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(response).await["error"].is_string());
    assert_eq!(stored_count(temp_dir.path()), 0);

    // Exactly at the ceiling is fine
    let content = vec![b'a'; max];
    let response = app
        .clone()
        .oneshot(upload_request("edge.zip", &content))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stored_count(temp_dir.path()), 1);
}

#[tokio::test]
async fn test_body_over_transport_limit_is_rejected() {
    let (temp_dir, app) = setup_app();
    let config = ServerConfig::development(temp_dir.path());

    let content = vec![b'a'; config.body_limit() + 1024];
    let response = app
        .oneshot(upload_request("huge.zip", &content))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(stored_count(temp_dir.path()), 0);
}
