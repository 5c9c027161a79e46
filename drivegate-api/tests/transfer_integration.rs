// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streaming transfer integration tests: upload, text, direct download.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use drivegate_api::{create_router, AppState};
use drivegate_core::LocalBackend;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

fn create_test_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("root");
    let assets = temp_dir.path().join("assets");
    std::fs::create_dir_all(&root).expect("Failed to create root dir");
    std::fs::create_dir_all(&assets).expect("Failed to create assets dir");

    let state = AppState::new(LocalBackend::with_capacity(&root, 1024 * 1024), &assets);
    (state, temp_dir)
}

fn app(state: AppState) -> axum::Router {
    create_router(state, CorsLayer::new())
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const BOUNDARY: &str = "X-DRIVEGATE-TEST-BOUNDARY";

fn multipart_request(path: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"upload\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder().method("GET").uri(path).body(Body::empty()).unwrap()
}

fn text_post(id_encoded: &str, content: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/text")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("id={id_encoded}&content={content}")))
        .unwrap()
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_writes_file_and_returns_descriptor() {
    let (state, _temp) = create_test_state();

    let app1 = app(state.clone());
    let response = app1
        .oneshot(multipart_request("/upload?id=%2F", "hello.txt", b"hello world"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["value"], "hello.txt");
    assert_eq!(json["id"], "/hello.txt");
    assert_eq!(json["size"], 11);
    assert_eq!(json["kind"], "file");

    // Content is readable back through the text endpoint.
    let app2 = app(state);
    let response = app2
        .oneshot(get_request("/text?id=%2Fhello.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response.into_body()).await, "hello world");
}

#[tokio::test]
async fn test_upload_same_name_twice_disambiguates() {
    let (state, _temp) = create_test_state();

    let app1 = app(state.clone());
    let response = app1
        .oneshot(multipart_request("/upload?id=%2F", "photo.jpg", b"first"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app2 = app(state);
    let response = app2
        .oneshot(multipart_request("/upload?id=%2F", "photo.jpg", b"second"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["value"], "photo (1).jpg");
    assert_eq!(json["size"], 6);
}

#[tokio::test]
async fn test_upload_into_missing_container_is_not_found() {
    let (state, _temp) = create_test_state();
    let response = app(state)
        .oneshot(multipart_request("/upload?id=%2Fnope", "a.txt", b"x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_without_file_field_is_bad_request() {
    let (state, _temp) = create_test_state();

    // A form field without a filename is not an upload.
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"note\"\r\n\r\n");
    body.extend_from_slice(b"just text");
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/upload?id=%2F")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "InvalidRequest");
}

// ============================================================================
// Text
// ============================================================================

#[tokio::test]
async fn test_text_round_trip() {
    let (state, _temp) = create_test_state();

    let app1 = app(state.clone());
    let response = app1
        .oneshot(text_post("%2Fnote.txt", "hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["id"], "/note.txt");
    assert_eq!(json["size"], 5);

    let app2 = app(state);
    let response = app2.oneshot(get_request("/text?id=%2Fnote.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_string(response.into_body()).await, "hello");
}

#[tokio::test]
async fn test_text_overwrites_existing_content() {
    let (state, _temp) = create_test_state();

    let app1 = app(state.clone());
    app1.oneshot(text_post("%2Fnote.txt", "first+draft"))
        .await
        .unwrap();

    let app2 = app(state.clone());
    let response = app2.oneshot(text_post("%2Fnote.txt", "final")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app3 = app(state);
    let response = app3.oneshot(get_request("/text?id=%2Fnote.txt")).await.unwrap();
    assert_eq!(body_string(response.into_body()).await, "final");
}

#[tokio::test]
async fn test_text_read_missing_is_not_found() {
    let (state, _temp) = create_test_state();
    let response = app(state).oneshot(get_request("/text?id=%2Fnope.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Direct download
// ============================================================================

#[tokio::test]
async fn test_direct_streams_inline_by_default() {
    let (state, _temp) = create_test_state();
    let app1 = app(state.clone());
    app1.oneshot(text_post("%2Freadme.md", "contents")).await.unwrap();

    let app2 = app(state);
    let response = app2.oneshot(get_request("/direct?id=%2Freadme.md")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename=readme.md"
    );
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "8");
    assert_eq!(body_string(response.into_body()).await, "contents");
}

#[tokio::test]
async fn test_direct_download_flag_forces_attachment() {
    let (state, _temp) = create_test_state();
    let app1 = app(state.clone());
    app1.oneshot(text_post("%2Freadme.md", "contents")).await.unwrap();

    let app2 = app(state);
    let response = app2
        .oneshot(get_request("/direct?id=%2Freadme.md&download=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=readme.md"
    );
}

#[tokio::test]
async fn test_direct_percent_encodes_display_name() {
    let (state, _temp) = create_test_state();
    let app1 = app(state.clone());
    // "my report.txt" — the space must not reach the header verbatim.
    app1.oneshot(text_post("%2Fmy%20report.txt", "x")).await.unwrap();

    let app2 = app(state);
    let response = app2
        .oneshot(get_request("/direct?id=%2Fmy%20report.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename=my%20report.txt"
    );
}

#[tokio::test]
async fn test_direct_missing_is_not_found() {
    let (state, _temp) = create_test_state();
    let response = app(state).oneshot(get_request("/direct?id=%2Fnope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "NotFound");
}
