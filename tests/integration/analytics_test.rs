//! Integration tests for analytics endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

async fn seed_expenses(app: &TestApp, token: &str) {
    for (amount, category) in [("100.00", "travel"), ("50.00", "meals"), ("25.00", "travel")] {
        let response = app
            .multipart_request(
                "POST",
                "/api/expenses",
                &[
                    ("amount", amount),
                    ("category", category),
                    ("expense_date", "2026-08-20"),
                ],
                None,
                token,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn summary_counts_statuses() {
    let app = TestApp::new().await;
    app.create_test_user("nums@test.com", "password123", "admin")
        .await;
    let token = app.login("nums@test.com", "password123").await;
    seed_expenses(&app, &token).await;

    let response = app
        .request("GET", "/api/analytics/summary", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["expense_count"], 3);
    assert_eq!(response.body["data"]["pending_count"], 3);
    assert_eq!(response.body["data"]["total_amount"], "175.00");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn summary_is_scoped_for_employees() {
    let app = TestApp::new().await;
    app.create_test_user("spender@test.com", "password123", "employee")
        .await;
    app.create_test_user("bystander@test.com", "password123", "employee")
        .await;
    let spender = app.login("spender@test.com", "password123").await;
    let bystander = app.login("bystander@test.com", "password123").await;
    seed_expenses(&app, &spender).await;

    let response = app
        .request("GET", "/api/analytics/summary", None, Some(&bystander))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["expense_count"], 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn category_breakdown_groups_amounts() {
    let app = TestApp::new().await;
    app.create_test_user("cat@test.com", "password123", "admin")
        .await;
    let token = app.login("cat@test.com", "password123").await;
    seed_expenses(&app, &token).await;

    let response = app
        .request("GET", "/api/analytics/categories", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"].as_array().unwrap();
    let travel = items
        .iter()
        .find(|i| i["category"] == "travel")
        .expect("travel row missing");
    assert_eq!(travel["total_amount"], "125.00");
    assert_eq!(travel["expense_count"], 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn org_wide_analytics_are_admin_only() {
    let app = TestApp::new().await;
    app.create_test_user("curious@test.com", "password123", "employee")
        .await;
    let token = app.login("curious@test.com", "password123").await;

    for path in [
        "/api/analytics/categories",
        "/api/analytics/trends",
        "/api/analytics/top-spenders",
    ] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn out_of_range_window_is_rejected() {
    let app = TestApp::new().await;
    app.create_test_user("window@test.com", "password123", "admin")
        .await;
    let token = app.login("window@test.com", "password123").await;

    let response = app
        .request("GET", "/api/analytics/summary?days=0", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/api/analytics/trends?months=48", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
