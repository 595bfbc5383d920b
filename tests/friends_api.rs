//! Friend requests and notifications end to end

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};

async fn send_request(app: &TestApp, from: &TestUser, to: &str) -> String {
    let (status, body) = app.post("/friend-requests", &from.token, json!({ "to": to })).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "pending");
    body["id"].as_str().unwrap().to_string()
}

async fn friends(app: &TestApp, user: &TestUser) -> Value {
    let (_, me) = app.get("/me", Some(&user.token)).await;
    me["friends"].clone()
}

#[tokio::test]
async fn test_accept_makes_symmetric_friendship() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let id = send_request(&app, &alice, "bob").await;

    let (_, inbox) = app.get("/friend-requests", Some(&bob.token)).await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["from"], "alice");
    assert_eq!(app.notification_types(&bob.token).await, vec!["friend_request"]);

    assert_status!(app.post_empty(&format!("/friend-requests/{}/accept", id), &bob.token).await, StatusCode::OK);

    assert_eq!(friends(&app, &alice).await, json!(["bob"]));
    assert_eq!(friends(&app, &bob).await, json!(["alice"]));
    assert_eq!(app.notification_types(&alice.token).await, vec!["friend_accept"]);

    let (_, inbox) = app.get("/friend-requests", Some(&bob.token)).await;
    assert!(inbox.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_can_be_answered_once() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let id = send_request(&app, &alice, "bob").await;

    assert_status!(app.post_empty(&format!("/friend-requests/{}/reject", id), &bob.token).await, StatusCode::OK);
    assert_error!(app.post_empty(&format!("/friend-requests/{}/accept", id), &bob.token).await, StatusCode::CONFLICT);
    assert_error!(app.post_empty(&format!("/friend-requests/{}/reject", id), &bob.token).await, StatusCode::CONFLICT);

    assert_eq!(friends(&app, &alice).await, json!([]));
    assert_eq!(friends(&app, &bob).await, json!([]));
    assert_eq!(app.notification_types(&alice.token).await, vec!["friend_reject"]);
}

#[tokio::test]
async fn test_only_recipient_can_answer() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    register(&app, "bob").await;
    let carol = register(&app, "carol").await;
    let id = send_request(&app, &alice, "bob").await;

    assert_error!(app.post_empty(&format!("/friend-requests/{}/accept", id), &alice.token).await, StatusCode::UNAUTHORIZED);
    assert_error!(app.post_empty(&format!("/friend-requests/{}/accept", id), &carol.token).await, StatusCode::UNAUTHORIZED);

    let missing = uuid::Uuid::new_v4();
    assert_error!(app.post_empty(&format!("/friend-requests/{}/accept", missing), &alice.token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_send_request_rules() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    assert_error!(app.post("/friend-requests", &alice.token, json!({ "to": "alice" })).await, StatusCode::BAD_REQUEST);
    assert_error!(app.post("/friend-requests", &alice.token, json!({ "to": "nobody" })).await, StatusCode::NOT_FOUND);

    let id = send_request(&app, &alice, "bob").await;
    assert_error!(app.post("/friend-requests", &alice.token, json!({ "to": "bob" })).await, StatusCode::CONFLICT);
    assert_error!(app.post("/friend-requests", &bob.token, json!({ "to": "alice" })).await, StatusCode::CONFLICT);

    app.post_empty(&format!("/friend-requests/{}/accept", id), &bob.token).await;
    assert_error!(app.post("/friend-requests", &bob.token, json!({ "to": "alice" })).await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_mark_notification_read() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    app.post_empty("/users/alice/follow", &bob.token).await;

    let (_, notifications) = app.get("/notifications", Some(&alice.token)).await;
    let notification = &notifications[0];
    assert_eq!(notification["actor"], "bob");
    assert_eq!(notification["message"], "bob followed you");
    assert_eq!(notification["is_read"], false);
    let id = notification["id"].as_str().unwrap().to_string();

    assert_error!(app.post_empty(&format!("/notifications/{}/read", id), &bob.token).await, StatusCode::NOT_FOUND);
    assert_status!(app.post_empty(&format!("/notifications/{}/read", id), &alice.token).await, StatusCode::OK);

    let (_, notifications) = app.get("/notifications", Some(&alice.token)).await;
    assert_eq!(notifications[0]["is_read"], true);
}
