//! Authentication test helpers
//!
//! Registering users through the real endpoint and building auth headers.

use axum::http::StatusCode;
use serde_json::json;

use super::TestApp;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A registered user and their session token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub token: String,
}

/// Register `username` and return its token
pub async fn register(app: &TestApp, username: &str) -> TestUser {
    let (status, body) = app
        .request(
            axum::http::Method::POST,
            "/register",
            None,
            Some(json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "registration of {} failed: {}", username, body);

    TestUser {
        username: username.to_string(),
        token: body["token"].as_str().expect("token missing").to_string(),
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
