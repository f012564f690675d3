mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/account/register")
        .json(&json!({
            "username": "Alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    // Username comes back normalized
    assert_eq!(body["data"]["username"], "alice");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username_case_insensitive() {
    let app = TestApp::spawn().await;

    app.register("Alice", "pass_word!").await;

    // Same username in different casing collides
    let response = app
        .post("/api/account/register")
        .json(&json!({
            "username": "alice",
            "password": "other_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("taken"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/account/register")
        .json(&json!({
            "username": "a",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    app.register("alice", "pass_word!").await;

    let response = app
        .post("/api/account/login")
        .json(&json!({
            "username": "Alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert!(body["data"]["main_photo_url"].is_null());
}

#[tokio::test]
async fn test_login_includes_main_photo_url() {
    let app = TestApp::spawn().await;

    let token = app.register("alice", "pass_word!").await;
    let photo = app.upload_photo(&token).await;

    let response = app
        .post("/api/account/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["main_photo_url"], photo["url"]);
}

#[tokio::test]
async fn test_login_unknown_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/account/login")
        .json(&json!({
            "username": "nobody",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.register("alice", "pass_word!").await;

    let response = app
        .post("/api/account/login")
        .json(&json!({
            "username": "alice",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Indistinguishable from the unknown-username outcome
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/members")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/members", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_member() {
    let app = TestApp::spawn().await;

    let token = app.register("alice", "pass_word!").await;
    let photo = app.upload_photo(&token).await;

    let response = app
        .get_authenticated("/api/members/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["main_photo_url"], photo["url"]);
    assert_eq!(body["data"]["photos"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_member_unknown() {
    let app = TestApp::spawn().await;

    let token = app.register("alice", "pass_word!").await;

    let response = app
        .get_authenticated("/api/members/nobody", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_members() {
    let app = TestApp::spawn().await;

    let token = app.register("alice", "pass_word!").await;
    app.register("bob", "pass_word!").await;

    let response = app
        .get_authenticated("/api/members", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
