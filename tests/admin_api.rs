//! Moderation, sponsored posts and the admin inbox

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

async fn setup() -> (TestApp, TestUser, TestUser) {
    let app = TestApp::with_admins(&["root"]).await;
    let admin = register(&app, "root").await;
    let alice = register(&app, "alice").await;
    (app, admin, alice)
}

#[tokio::test]
async fn test_configured_admin_is_promoted() {
    let (app, admin, alice) = setup().await;

    let (_, me) = app.get("/me", Some(&admin.token)).await;
    assert_eq!(me["is_admin"], true);
    let (_, me) = app.get("/me", Some(&alice.token)).await;
    assert_eq!(me["is_admin"], false);
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let (app, _admin, alice) = setup().await;

    assert_error!(app.get("/admin/messages", Some(&alice.token)).await, StatusCode::UNAUTHORIZED);
    assert_error!(app.get("/admin/deleted-posts", Some(&alice.token)).await, StatusCode::UNAUTHORIZED);
    assert_error!(app.post_empty("/users/alice/verify", &alice.token).await, StatusCode::UNAUTHORIZED);
    assert_error!(app.post_empty("/users/root/ban", &alice.token).await, StatusCode::UNAUTHORIZED);
    let sponsored = app.post("/admin/sponsored-posts", &alice.token, json!({ "content": "buy" })).await;
    assert_error!(sponsored, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ban_revokes_access() {
    let (app, admin, alice) = setup().await;

    assert_status!(app.post_empty("/users/alice/ban", &admin.token).await, StatusCode::OK);
    assert_error!(app.get("/me", Some(&alice.token)).await, StatusCode::UNAUTHORIZED);

    let login = app
        .request(
            axum::http::Method::POST,
            "/login",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        )
        .await;
    assert_error!(login, StatusCode::UNAUTHORIZED);

    assert_status!(app.post_empty("/users/alice/unban", &admin.token).await, StatusCode::OK);
    assert_status!(app.get("/me", Some(&alice.token)).await, StatusCode::OK);

    assert_error!(app.post_empty("/users/nobody/ban", &admin.token).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_verify_notifies_from_system() {
    let (app, admin, alice) = setup().await;

    assert_status!(app.post_empty("/users/alice/verify", &admin.token).await, StatusCode::OK);

    let (_, profile) = app.get("/users/alice", None).await;
    assert_eq!(profile["verified"], true);

    let (_, notifications) = app.get("/notifications", Some(&alice.token)).await;
    assert_eq!(notifications[0]["type"], "verified");
    assert_eq!(notifications[0]["actor"], "system");
}

#[tokio::test]
async fn test_soft_delete_hides_post_everywhere() {
    let (app, admin, alice) = setup().await;
    let (_, post) = app.post("/posts", &alice.token, json!({ "content": "oops" })).await;
    let id = post["id"].as_str().unwrap().to_string();

    assert_status!(app.post_empty(&format!("/posts/{}/delete", id), &admin.token).await, StatusCode::OK);

    let (_, explore) = app.get("/explore", None).await;
    assert!(explore.as_array().unwrap().is_empty());
    let (_, feed) = app.get("/feed", Some(&alice.token)).await;
    assert!(feed.as_array().unwrap().is_empty());
    assert_error!(app.get(&format!("/posts/{}", id), None).await, StatusCode::NOT_FOUND);
    assert_error!(app.post_empty(&format!("/posts/{}/like", id), &alice.token).await, StatusCode::NOT_FOUND);

    let (status, deleted) = app.get("/admin/deleted-posts", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted[0]["id"], json!(id));
    assert_eq!(deleted[0]["deleted"], true);
}

#[tokio::test]
async fn test_sponsored_post() {
    let (app, admin, alice) = setup().await;
    app.post_empty("/users/root/follow", &alice.token).await;

    let (status, post) = app.post("/admin/sponsored-posts", &admin.token, json!({ "content": "Try Amity Pro" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["sponsored"], true);
    assert_eq!(post["username"], "root");

    assert!(app.notification_types(&alice.token).await.is_empty());

    let over = "a".repeat(281);
    let response = app.post("/admin/sponsored-posts", &admin.token, json!({ "content": over })).await;
    assert_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_admin_inbox() {
    let (app, admin, alice) = setup().await;

    let (status, message) = app.post("/contact-admin", &alice.token, json!({ "content": "Help!" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["read"], false);

    let (_, inbox) = app.get("/admin/messages", Some(&admin.token)).await;
    assert_eq!(inbox[0]["from"], "alice");
    assert_eq!(inbox[0]["content"], "Help!");

    assert_error!(app.post("/contact-admin", &alice.token, json!({ "content": " " })).await, StatusCode::BAD_REQUEST);
}
