//! Integration tests for authentication flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn login_success() {
    let app = TestApp::new().await;
    app.create_test_user("alice@test.com", "password123", "employee")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "alice@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["token"].is_string());
    assert!(response.body["data"]["expires_at"].is_string());
    assert_eq!(response.body["data"]["user"]["email"], "alice@test.com");
    // Password hash must never appear in responses.
    assert!(response.body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn login_wrong_password_and_unknown_email_are_identical() {
    let app = TestApp::new().await;
    app.create_test_user("bob@test.com", "password123", "employee")
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bob@test.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // Same error body either way so accounts cannot be enumerated.
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["message"], "Invalid email or password");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn me_returns_current_user() {
    let app = TestApp::new().await;
    app.create_test_user("carol@test.com", "password123", "admin")
        .await;
    let token = app.login("carol@test.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "carol@test.com");
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn deleted_user_is_locked_out() {
    let app = TestApp::new().await;
    let user_id = app
        .create_test_user("gone@test.com", "password123", "employee")
        .await;
    let token = app.login("gone@test.com", "password123").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to delete user");

    // The token is still cryptographically valid but the account is gone.
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn logout_records_audit_entry() {
    let app = TestApp::new().await;
    app.create_test_user("dave@test.com", "password123", "employee")
        .await;
    let token = app.login("dave@test.com", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM audit_log WHERE action = 'logout'::audit_action")
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to count audit entries");
    assert_eq!(count, 1);
}
