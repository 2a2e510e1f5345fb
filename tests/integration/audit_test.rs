//! Integration tests for the audit trail.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn mutations_leave_audit_entries() {
    let app = TestApp::new().await;
    app.create_test_user("auditor@test.com", "password123", "admin")
        .await;
    let token = app.login("auditor@test.com", "password123").await;

    let create = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "75.00"),
                ("category", "equipment"),
                ("expense_date", "2026-08-15"),
            ],
            None,
            &token,
        )
        .await;
    assert_eq!(create.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/audit", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let actions: Vec<&str> = response.body["data"]["items"]
        .as_array()
        .expect("items missing")
        .iter()
        .filter_map(|e| e["action"].as_str())
        .collect();
    assert!(actions.contains(&"login"));
    assert!(actions.contains(&"expense_created"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn audit_filters_by_action() {
    let app = TestApp::new().await;
    app.create_test_user("filter@test.com", "password123", "admin")
        .await;
    let token = app.login("filter@test.com", "password123").await;
    // A second login so there are multiple entries.
    app.login("filter@test.com", "password123").await;

    let response = app
        .request("GET", "/api/audit?action=login", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|e| e["action"] == "login"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn logs_alias_matches_audit() {
    let app = TestApp::new().await;
    app.create_test_user("alias@test.com", "password123", "admin")
        .await;
    let token = app.login("alias@test.com", "password123").await;

    let audit = app.request("GET", "/api/audit", None, Some(&token)).await;
    let logs = app.request("GET", "/api/logs", None, Some(&token)).await;

    assert_eq!(audit.status, StatusCode::OK);
    assert_eq!(logs.status, StatusCode::OK);
    assert_eq!(audit.body, logs.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn audit_is_admin_only() {
    let app = TestApp::new().await;
    app.create_test_user("peon@test.com", "password123", "employee")
        .await;
    let token = app.login("peon@test.com", "password123").await;

    let response = app.request("GET", "/api/audit", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let (status, _, _) = app.request_raw("/api/audit/export", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn audit_export_records_itself() {
    let app = TestApp::new().await;
    app.create_test_user("exporter@test.com", "password123", "admin")
        .await;
    let token = app.login("exporter@test.com", "password123").await;

    let (status, content_type, body) = app.request_raw("/api/audit/export", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/csv"));
    assert!(body.starts_with("id,actor_id,action,description,created_at"));

    // The export itself lands in the trail.
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM audit_log WHERE action = 'data_exported'::audit_action",
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to count audit entries");
    assert_eq!(count, 1);
}
