//! Multipart uploads into the local blob store

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::*;

const BOUNDARY: &str = "amity-test-boundary";

fn multipart_request(token: &str, field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            field, filename, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(header::AUTHORIZATION, auth_header(token))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_stores_file_and_serves_it() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;

    let response = app
        .send(multipart_request(&alice.token, "file", "cat photo.png", "image/png", b"not really a png"))
        .await;
    assert_status!(response, StatusCode::OK);

    let (_, body) = response;
    assert_eq!(body["type"], "photo");
    assert_eq!(body["size"], 16);
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"), "{}", url);
    assert!(url.ends_with("-cat_photo.png"), "{}", url);

    let stored = app.upload_dir.path().join(url.trim_start_matches('/'));
    assert_eq!(std::fs::read(&stored).unwrap(), b"not really a png");

    let request = Request::builder().uri(url.as_str()).body(Body::empty()).unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_classifies_media() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;

    let (_, video) = app.send(multipart_request(&alice.token, "file", "clip.mp4", "video/mp4", b"frames")).await;
    assert_eq!(video["type"], "video");

    let (_, doc) = app.send(multipart_request(&alice.token, "file", "notes.txt", "text/plain", b"text")).await;
    assert_eq!(doc["type"], "file");
}

#[tokio::test]
async fn test_upload_requires_file_field_and_token() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;

    let response = app.send(multipart_request(&alice.token, "other", "a.png", "image/png", b"x")).await;
    assert_error!(response, StatusCode::BAD_REQUEST);

    let response = app.send(multipart_request("bogus", "file", "a.png", "image/png", b"x")).await;
    assert_error!(response, StatusCode::UNAUTHORIZED);
}
