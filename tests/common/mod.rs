//! Common test utilities and helpers
//!
//! - `TestApp`: the real router over an in-memory SQLite store, or over a
//!   pooled file store for tests that need concurrent writers
//! - Authentication helpers for registering users and attaching tokens
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;

pub use auth_helpers::*;

use std::time::Duration;

use amity::backend::server::create_app_with_store;
use amity::backend::store::Store;
use amity::shared::AppConfig;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-do-not-use";

/// The application under test
pub struct TestApp {
    pub router: Router,
    pub store: Store,
    /// Local upload root; removed when the app is dropped
    pub upload_dir: TempDir,
    /// Holds the database file of a file-backed app
    db_dir: Option<TempDir>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_admins(&[]).await
    }

    /// An app whose configuration promotes `admins` on registration
    pub async fn with_admins(admins: &[&str]) -> Self {
        let store = Store::in_memory(Duration::from_secs(5))
            .await
            .expect("Failed to open in-memory store");
        Self::build(store, admins, None).await
    }

    /// An app over a SQLite file with a pool of `max_connections`
    pub async fn file_backed(max_connections: u32) -> Self {
        let db_dir = TempDir::new().expect("Failed to create database dir");
        let url = format!("sqlite://{}", db_dir.path().join("amity.db").display());
        let store = Store::connect(&url, max_connections, Duration::from_secs(5))
            .await
            .expect("Failed to open file store");
        Self::build(store, &[], Some(db_dir)).await
    }

    async fn build(store: Store, admins: &[&str], db_dir: Option<TempDir>) -> Self {
        let upload_dir = TempDir::new().expect("Failed to create upload dir");

        let mut builder = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            .bcrypt_cost(4)
            .upload_dir(upload_dir.path().to_string_lossy().to_string());
        for admin in admins {
            builder = builder.admin(*admin);
        }
        let config = builder.build().expect("Invalid test config");

        store.migrate().await.expect("Failed to migrate");

        let router = create_app_with_store(config, store.clone())
            .await
            .expect("Failed to build app");

        Self { router, store, upload_dir, db_dir }
    }

    /// Send a request and decode the JSON response body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    /// POST without a body
    pub async fn post_empty(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), None).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    /// Notification types received by the owner of `token`, newest first
    pub async fn notification_types(&self, token: &str) -> Vec<String> {
        let (status, body) = self.get("/notifications", Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .expect("notifications should be an array")
            .iter()
            .map(|n| n["type"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
