mod common;

use auth::Claims;
use chrono::Duration;
use common::TestApp;
use expense_service::domain::auth::service::TokenTtls;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], "User registered successfully");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Same username, different password
    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice",
            "password": "other_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Username already exists"));
}

#[tokio::test]
async fn test_register_empty_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "   ",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Username must not be empty"));
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");

    let expires_in = body["expires_in"].as_i64().expect("Missing expires_in");
    assert!(expires_in > 0 && expires_in <= 15 * 60);

    let access: Claims = app
        .jwt_handler
        .decode(body["access_token"].as_str().unwrap())
        .expect("Failed to decode access token");
    assert_eq!(access.sub.as_deref(), Some("alice"));
    assert!(!access.is_refresh());

    let refresh: Claims = app
        .jwt_handler
        .decode(body["refresh_token"].as_str().unwrap())
        .expect("Failed to decode refresh token");
    assert_eq!(refresh.sub.as_deref(), Some("alice"));
    assert!(refresh.is_refresh());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "ghost",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Same body as a wrong password, by design
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_repeated_login_reuses_pair() {
    let app = TestApp::spawn().await;

    let (access, refresh) = app.register_and_login("alice", "pass_word!").await;

    // Waiting a second guarantees freshly minted tokens would carry a
    // different expiry, so equality below proves reuse
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["access_token"], access.as_str());
    assert_eq!(body["refresh_token"], refresh.as_str());
}

#[tokio::test]
async fn test_login_reissues_after_expiry() {
    let app = TestApp::spawn_with_ttls(TokenTtls {
        access: Duration::seconds(2),
        refresh: Duration::days(7),
    })
    .await;

    let (access, refresh) = app.register_and_login("alice", "pass_word!").await;

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_ne!(body["access_token"], access.as_str());
    assert_ne!(body["refresh_token"], refresh.as_str());

    let expires_in = body["expires_in"].as_i64().expect("Missing expires_in");
    assert!(expires_in > 0 && expires_in <= 2);
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/expenses")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/expenses")
        .header("Authorization", "Token abc123")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Expected: Bearer <token>"));
}

#[tokio::test]
async fn test_garbage_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/expenses", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    let app = TestApp::spawn().await;

    app.register_and_login("alice", "pass_word!").await;

    let expired = app
        .jwt_handler
        .issue(Claims::access("alice"), Duration::seconds(-60))
        .expect("Failed to issue token")
        .token;

    let response = app
        .get_authenticated("/expenses", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_access_refresh_flow() {
    let app = TestApp::spawn_with_ttls(TokenTtls {
        access: Duration::seconds(1),
        refresh: Duration::days(7),
    })
    .await;

    let (access, refresh) = app.register_and_login("alice", "pass_word!").await;

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    // The expired access token bounces off the protected route
    let response = app
        .get_authenticated("/expenses", &access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The refresh exchange replaces it
    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["refresh_token"], refresh.as_str());
    let new_access = body["access_token"].as_str().unwrap().to_string();
    assert_ne!(new_access, access);

    // And the replacement works
    let response = app
        .get_authenticated("/expenses", &new_access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = TestApp::spawn().await;

    let (access, _refresh) = app.register_and_login("alice", "pass_word!").await;

    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": access }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_refresh_with_garbage_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": "not.a.token" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_refresh_mismatch_after_new_login() {
    let app = TestApp::spawn_with_ttls(TokenTtls {
        access: Duration::seconds(1),
        refresh: Duration::days(7),
    })
    .await;

    let (_access, old_refresh) = app.register_and_login("alice", "pass_word!").await;

    // Once the access token expires, a new login supersedes the session
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": old_refresh }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Refresh token mismatch");
}

#[tokio::test]
async fn test_refresh_is_repeatable() {
    let app = TestApp::spawn().await;

    let (_access, refresh) = app.register_and_login("alice", "pass_word!").await;

    // No rotation on use: the same refresh token keeps working
    for _ in 0..2 {
        let response = app
            .post("/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["refresh_token"], refresh.as_str());
    }
}

#[tokio::test]
async fn test_deleted_user_gets_not_found() {
    let app = TestApp::spawn().await;

    let (access, refresh) = app.register_and_login("alice", "pass_word!").await;
    let user_id = app.user_id("alice").await;

    // The session row references the user, so it goes first
    sqlx::query("DELETE FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to delete session");
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to delete user");

    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("User not found"));

    // The still-valid access token dies with its user too
    let response = app
        .get_authenticated("/expenses", &access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_old_access_token_survives_refresh() {
    let app = TestApp::spawn().await;

    let (access, refresh) = app.register_and_login("alice", "pass_word!").await;

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let response = app
        .post("/refresh")
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_ne!(body["access_token"], access.as_str());

    // Refresh replaces the stored token but does not revoke the old one;
    // it remains valid until its own expiry
    let response = app
        .get_authenticated("/expenses", &access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
