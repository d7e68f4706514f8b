mod common;

use auth::AccessClaims;
use auth::Role;
use auth::TokenHandler;
use chrono::Utc;
use common::TestApp;
use common::TEST_SECRET;
use reqwest::StatusCode;
use serde_json::json;

async fn register_ana(app: &TestApp) -> serde_json::Value {
    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn login(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login_token(app: &TestApp, email: &str, password: &str) -> String {
    let response = login(app, email, password).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let body = register_ana(&app).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["email"], "ana@x.com");
    assert!(body["data"]["id"].is_string());
    // The credential secret never appears in any projection
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ana Again",
            "email": "ana@x.com",
            "password": "another_secret"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "user already exists");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ana",
            "email": "not-an-email",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;

    let response = login(&app, "ana@x.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["name"], "Ana");
    assert_eq!(body["data"]["user"]["email"], "ana@x.com");
    assert!(body["data"]["user"].get("password").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;

    // Wrong password for a registered email
    let wrong_password = login(&app, "ana@x.com", "wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse");

    // Email that was never registered
    let unknown_email = login(&app, "nobody@x.com", "secret1").await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: serde_json::Value = unknown_email.json().await.expect("Failed to parse");

    // Identical body either way, so the endpoint never reveals whether an
    // email is registered
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["message"], "invalid credentials");
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "token not provided");
}

#[tokio::test]
async fn test_profile_rejects_malformed_authorization() {
    let app = TestApp::spawn().await;

    for value in ["Token abc123", "Bearer", "Bearer "] {
        let response = app
            .get("/api/user/me")
            .header("Authorization", value)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "token format invalid");
    }
}

#[tokio::test]
async fn test_profile_rejects_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/user/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn test_profile_rejects_expired_token() {
    let app = TestApp::spawn().await;
    register_ana(&app).await;

    // Sign an already-expired token with the app's own secret
    let handler = TokenHandler::new(TEST_SECRET);
    let mut claims = AccessClaims::new(
        uuid::Uuid::new_v4().to_string(),
        "ana@x.com",
        Role::User,
        1,
    );
    claims.iat = Utc::now().timestamp() - 7200;
    claims.exp = Utc::now().timestamp() - 3600;
    let token = handler.encode(&claims).unwrap();

    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "token expired");
}

#[tokio::test]
async fn test_profile_rejects_incomplete_token_payload() {
    let app = TestApp::spawn().await;

    // Validly signed, unexpired, but with an empty email claim
    let handler = TokenHandler::new(TEST_SECRET);
    let claims = AccessClaims::new(uuid::Uuid::new_v4().to_string(), "", Role::User, 1);
    let token = handler.encode(&claims).unwrap();

    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "invalid token payload");
}

#[tokio::test]
async fn test_get_profile_success() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["email"], "ana@x.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_update_profile_name() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .put_authenticated("/api/user/me", &token)
        .json(&json!({ "name": "Ana Maria" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ana Maria");
    assert_eq!(body["data"]["email"], "ana@x.com");
}

#[tokio::test]
async fn test_update_password_rotates_credential() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .put_authenticated("/api/user/me", &token)
        .json(&json!({ "password": "rotated_secret" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer authenticates, new one does
    let old = login(&app, "ana@x.com", "secret1").await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = login(&app, "ana@x.com", "rotated_secret").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_profile() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .delete_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The token still verifies (stateless), but the record is gone
    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_listing_forbidden_for_user_role() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "insufficient permissions");
}

#[tokio::test]
async fn test_admin_listing_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "token not provided");
}

#[tokio::test]
async fn test_admin_listing_allowed_for_admin_role() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    app.promote_to_admin("ana@x.com");

    // A fresh login picks up the stored admin role
    let token = login_token(&app, "ana@x.com", "secret1").await;

    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "ana@x.com");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_admin_token_passes_profile_guard() {
    let app = TestApp::spawn().await;

    register_ana(&app).await;
    app.promote_to_admin("ana@x.com");
    let token = login_token(&app, "ana@x.com", "secret1").await;

    // The profile guard lists both roles, so admins pass by membership
    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_full_auth_workflow() {
    let app = TestApp::spawn().await;

    // 1. Register
    let created = register_ana(&app).await;
    let user_id = created["data"]["id"].as_str().unwrap().to_string();

    // 2. Login with the wrong password fails
    let response = login(&app, "ana@x.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 3. Login with the right credentials returns a token
    let token = login_token(&app, "ana@x.com", "secret1").await;

    // 4. The token resolves to the stored profile
    let response = app
        .get_authenticated("/api/user/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["name"], "Ana");

    // 5. No token, no profile
    let response = app
        .get("/api/user/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 6. The user-role token cannot reach the admin listing
    let response = app
        .get_authenticated("/api/user", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
