mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("david@example.com", None).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "David");
    assert_eq!(body["data"]["email"], "david@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["verified"], false);
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_register_missing_field_lists_custom_message() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "lastname": "Durand",
            "email": "david@example.com",
            "password": "password123",
            "confirmPassword": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["errors"]["name"], "First name is required.");

    // No user was created: login is rejected, not unverified
    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "david@example.com", "password": "password123"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "name": "David",
            "lastname": "Durand",
            "email": "david@example.com",
            "password": "password123",
            "confirmPassword": "password456"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("do not match"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("david@example.com", None).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register("david@example.com", None).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_register_via_compatibility_route() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth")
        .json(&json!({
            "name": "David",
            "lastname": "Durand",
            "email": "compat@example.com",
            "password": "password123",
            "confirmPassword": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_rejects_unverified_account() {
    let app = TestApp::spawn().await;

    let response = app.register("david@example.com", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "david@example.com", "password": "password123"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_after_verification_greets_user() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "david@example.com", "password": "password123"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Welcome David");
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_login_does_not_disclose_which_credential_was_wrong() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({"email": "david@example.com", "password": "not_the_password"}))
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_password_status = wrong_password.status();
    let wrong_password_body: Value = wrong_password.json().await.unwrap();

    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "not_the_password"}))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email_status = unknown_email.status();
    let unknown_email_body: Value = unknown_email.json().await.unwrap();

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_body, unknown_email_body);
}

#[tokio::test]
async fn test_verification_token_is_single_use() {
    let app = TestApp::spawn().await;

    let response = app.register("david@example.com", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = app.latest_token("david@example.com", "verification").await;

    let first = app
        .get(&format!("/api/auth/verify/{}", token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .get(&format!("/api/auth/verify/{}", token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::GONE);
}

#[tokio::test]
async fn test_password_reset_request_is_nondisclosing() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;

    let existing = app
        .post("/api/auth/password-reset-request")
        .json(&json!({"email": "david@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");
    let existing_status = existing.status();
    let existing_body: Value = existing.json().await.unwrap();

    let unknown = app
        .post("/api/auth/password-reset-request")
        .json(&json!({"email": "nobody@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_status = unknown.status();
    let unknown_body: Value = unknown.json().await.unwrap();

    assert_eq!(existing_status, StatusCode::OK);
    assert_eq!(unknown_status, StatusCode::OK);
    assert_eq!(existing_body, unknown_body);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;

    let response = app
        .post("/api/auth/password-reset-request")
        .json(&json!({"email": "david@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let token = app.latest_token("david@example.com", "reset").await;

    let response = app
        .post(&format!("/api/auth/reset-password/{}", token))
        .json(&json!({"password": "brand_new_password"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works
    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "david@example.com", "password": "password123"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New one does
    app.login_token("david@example.com", "brand_new_password")
        .await;

    // The reset token was consumed
    let response = app
        .post(&format!("/api/auth/reset-password/{}", token))
        .json(&json!({"password": "another_password"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::GONE);
}

#[tokio::test]
async fn test_user_profile_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/user-profile")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_profile_greets_authenticated_user() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;
    let token = app.login_token("david@example.com", "password123").await;

    let response = app
        .get_authenticated("/api/auth/user-profile", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Welcome David");
}

#[tokio::test]
async fn test_admin_panel_role_matrix() {
    let app = TestApp::spawn().await;

    app.register_verified("mod@example.com", Some("moderator"))
        .await;
    app.register_verified("admin@example.com", Some("admin"))
        .await;

    let moderator = app.login_token("mod@example.com", "password123").await;
    let admin = app.login_token("admin@example.com", "password123").await;

    let response = app
        .get_authenticated("/api/auth/admin-panel", &moderator)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .get_authenticated("/api/auth/admin-panel", &admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // The moderator section takes both
    let response = app
        .get_authenticated("/api/auth/moderator-section", &moderator)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/api/auth/moderator-section", &admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let app = TestApp::spawn().await;
    app.register_verified("david@example.com", None).await;
    let token = app.login_token("david@example.com", "password123").await;

    let response = app
        .get_authenticated("/api/auth/user-profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_authenticated("/api/auth/logout", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/api/auth/user-profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_token_still_succeeds() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
