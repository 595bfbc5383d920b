//! Profiles, the follow/block graph, pinning and search

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

async fn followers(app: &TestApp, username: &str) -> i64 {
    let (_, body) = app.get(&format!("/users/{}", username), None).await;
    body["followers"].as_i64().unwrap()
}

#[tokio::test]
async fn test_follow_is_idempotent_and_notifies_once() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    assert_status!(app.post_empty("/users/alice/follow", &bob.token).await, StatusCode::OK);
    assert_status!(app.post_empty("/users/alice/follow", &bob.token).await, StatusCode::OK);

    assert_eq!(followers(&app, "alice").await, 1);
    assert_eq!(app.notification_types(&alice.token).await, vec!["follow"]);

    let (_, me) = app.get("/me", Some(&bob.token)).await;
    assert_eq!(me["following"], json!(["alice"]));
}

#[tokio::test]
async fn test_unfollow_never_goes_negative() {
    let app = TestApp::new().await;
    register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    assert_status!(app.post_empty("/users/alice/unfollow", &bob.token).await, StatusCode::OK);
    assert_eq!(followers(&app, "alice").await, 0);

    app.post_empty("/users/alice/follow", &bob.token).await;
    app.post_empty("/users/alice/unfollow", &bob.token).await;
    app.post_empty("/users/alice/unfollow", &bob.token).await;
    assert_eq!(followers(&app, "alice").await, 0);
}

#[tokio::test]
async fn test_cannot_follow_self_or_unknown() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;

    assert_error!(app.post_empty("/users/alice/follow", &alice.token).await, StatusCode::BAD_REQUEST);
    assert_error!(app.post_empty("/users/nobody/follow", &alice.token).await, StatusCode::NOT_FOUND);
    assert_error!(app.post_empty("/users/alice/block", &alice.token).await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_block_hides_author_from_feed() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let mallory = register(&app, "mallory").await;

    app.post("/posts", &mallory.token, json!({ "content": "spam" })).await;
    app.post("/posts", &alice.token, json!({ "content": "hello" })).await;

    assert_status!(app.post_empty("/users/mallory/block", &alice.token).await, StatusCode::OK);
    let (_, feed) = app.get("/feed", Some(&alice.token)).await;
    let authors: Vec<&str> = feed.as_array().unwrap().iter().map(|p| p["username"].as_str().unwrap()).collect();
    assert_eq!(authors, vec!["alice"]);

    let (_, me) = app.get("/me", Some(&alice.token)).await;
    assert_eq!(me["blocked"], json!(["mallory"]));

    app.post_empty("/users/mallory/unblock", &alice.token).await;
    let (_, feed) = app.get("/feed", Some(&alice.token)).await;
    assert_eq!(feed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_profile_is_self_only() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let update = json!({
        "location": "Porto",
        "settings": { "messaging": "friends" }
    });
    assert_error!(app.put("/users/alice/update", &bob.token, update.clone()).await, StatusCode::UNAUTHORIZED);

    let (status, body) = app.put("/users/alice/update", &alice.token, update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Porto");
    assert_eq!(body["settings"]["messaging"], "friends");
    assert_eq!(body["settings"]["profile_visibility"], "public");
}

#[tokio::test]
async fn test_profile_visibility_is_stored_not_enforced() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;

    let update = json!({ "settings": { "profile_visibility": "private" } });
    assert_status!(app.put("/users/alice/update", &alice.token, update).await, StatusCode::OK);

    let (status, body) = app.get("/users/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["settings"]["profile_visibility"], "private");
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn test_pin_post_requires_ownership() {
    let app = TestApp::new().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (_, post) = app.post("/posts", &bob.token, json!({ "content": "bob's post" })).await;
    let bobs_post = post["id"].as_str().unwrap().to_string();
    let (_, post) = app.post("/posts", &alice.token, json!({ "content": "alice's post" })).await;
    let alices_post = post["id"].as_str().unwrap().to_string();

    let response = app
        .post("/users/alice/pin-post", &alice.token, json!({ "post_id": bobs_post }))
        .await;
    assert_error!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .post("/users/alice/pin-post", &alice.token, json!({ "post_id": alices_post }))
        .await;
    assert_status!(response, StatusCode::OK);

    let (_, profile) = app.get("/users/alice", None).await;
    assert_eq!(profile["pinned_post_id"], json!(alices_post));
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let app = TestApp::new().await;
    register(&app, "Alice").await;
    register(&app, "malice").await;
    register(&app, "bob").await;

    let (status, body) = app.get("/search/users?q=ALI", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body.as_array().unwrap().iter().map(|u| u["username"].as_str().unwrap()).collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "malice"]);

    let (_, body) = app.get("/search/users?q=%25", None).await;
    assert!(body.as_array().unwrap().is_empty());
}
