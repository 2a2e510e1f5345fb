//! Integration tests for the expense lifecycle.

use http::StatusCode;

use crate::helpers::TestApp;

// Minimal valid PNG header, enough for the content-type check.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

async fn submit_expense(app: &TestApp, token: &str, amount: &str) -> serde_json::Value {
    let response = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", amount),
                ("category", "travel"),
                ("expense_date", "2026-08-01"),
                ("notes", "Taxi from the airport"),
            ],
            None,
            token,
        )
        .await;

    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "Submit failed: {:?}",
        response.body
    );
    response.body["data"].clone()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn submitted_expense_starts_pending() {
    let app = TestApp::new().await;
    app.create_test_user("emp@test.com", "password123", "employee")
        .await;
    let token = app.login("emp@test.com", "password123").await;

    let expense = submit_expense(&app, &token, "42.50").await;

    assert_eq!(expense["status"], "pending");
    assert_eq!(expense["amount"], "42.50");
    assert_eq!(expense["category"], "travel");
    assert!(expense["rejection_reason"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn receipt_upload_is_stored() {
    let app = TestApp::new().await;
    app.create_test_user("receipt@test.com", "password123", "employee")
        .await;
    let token = app.login("receipt@test.com", "password123").await;

    let response = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "12.00"),
                ("category", "meals"),
                ("expense_date", "2026-08-02"),
            ],
            Some(("image/png", PNG_BYTES)),
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let path = response.body["data"]["receipt_path"]
        .as_str()
        .expect("receipt_path missing");
    assert!(path.ends_with(".png"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn unsupported_receipt_type_is_rejected() {
    let app = TestApp::new().await;
    app.create_test_user("badfile@test.com", "password123", "employee")
        .await;
    let token = app.login("badfile@test.com", "password123").await;

    let response = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "12.00"),
                ("category", "meals"),
                ("expense_date", "2026-08-02"),
            ],
            Some(("image/svg+xml", b"<svg/>")),
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn amount_bounds_are_enforced() {
    let app = TestApp::new().await;
    app.create_test_user("bounds@test.com", "password123", "employee")
        .await;
    let token = app.login("bounds@test.com", "password123").await;

    for amount in ["0.00", "-5.00", "1000000.01"] {
        let response = app
            .multipart_request(
                "POST",
                "/api/expenses",
                &[
                    ("amount", amount),
                    ("category", "other"),
                    ("expense_date", "2026-08-01"),
                ],
                None,
                &token,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "amount {amount} should be rejected"
        );
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn employees_only_see_their_own_expenses() {
    let app = TestApp::new().await;
    app.create_test_user("owner@test.com", "password123", "employee")
        .await;
    app.create_test_user("other@test.com", "password123", "employee")
        .await;
    let owner_token = app.login("owner@test.com", "password123").await;
    let other_token = app.login("other@test.com", "password123").await;

    let expense = submit_expense(&app, &owner_token, "99.99").await;
    let expense_id = expense["id"].as_str().unwrap();

    // Not visible in the other employee's list, even with a user_id filter.
    let list = app
        .request("GET", "/api/expenses", None, Some(&other_token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"]["total_items"], 0);

    // Direct fetch is forbidden.
    let get = app
        .request(
            "GET",
            &format!("/api/expenses/{expense_id}"),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(get.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn admin_sees_all_expenses() {
    let app = TestApp::new().await;
    app.create_test_user("emp2@test.com", "password123", "employee")
        .await;
    app.create_test_user("boss@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp2@test.com", "password123").await;
    let admin_token = app.login("boss@test.com", "password123").await;

    submit_expense(&app, &emp_token, "10.00").await;

    let list = app
        .request("GET", "/api/expenses", None, Some(&admin_token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"]["total_items"], 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn approve_and_reject_pending_expense() {
    let app = TestApp::new().await;
    app.create_test_user("emp3@test.com", "password123", "employee")
        .await;
    app.create_test_user("admin3@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp3@test.com", "password123").await;
    let admin_token = app.login("admin3@test.com", "password123").await;

    let first = submit_expense(&app, &emp_token, "20.00").await;
    let second = submit_expense(&app, &emp_token, "30.00").await;

    let approve = app
        .request(
            "PUT",
            &format!("/api/expenses/{}/status", first["id"].as_str().unwrap()),
            Some(serde_json::json!({ "status": "approved" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(approve.status, StatusCode::OK);
    assert_eq!(approve.body["data"]["status"], "approved");

    let reject = app
        .request(
            "PUT",
            &format!("/api/expenses/{}/status", second["id"].as_str().unwrap()),
            Some(serde_json::json!({ "status": "rejected", "reason": "No receipt" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(reject.status, StatusCode::OK);
    assert_eq!(reject.body["data"]["status"], "rejected");
    assert_eq!(reject.body["data"]["rejection_reason"], "No receipt");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn deciding_a_decided_expense_conflicts() {
    let app = TestApp::new().await;
    app.create_test_user("emp4@test.com", "password123", "employee")
        .await;
    app.create_test_user("admin4@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp4@test.com", "password123").await;
    let admin_token = app.login("admin4@test.com", "password123").await;

    let expense = submit_expense(&app, &emp_token, "20.00").await;
    let path = format!("/api/expenses/{}/status", expense["id"].as_str().unwrap());

    let first = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "status": "approved" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "status": "rejected" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn employee_cannot_decide() {
    let app = TestApp::new().await;
    app.create_test_user("emp5@test.com", "password123", "employee")
        .await;
    let token = app.login("emp5@test.com", "password123").await;

    let expense = submit_expense(&app, &token, "20.00").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/expenses/{}/status", expense["id"].as_str().unwrap()),
            Some(serde_json::json!({ "status": "approved" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn editing_resets_status_to_pending() {
    let app = TestApp::new().await;
    app.create_test_user("emp6@test.com", "password123", "employee")
        .await;
    app.create_test_user("admin6@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp6@test.com", "password123").await;
    let admin_token = app.login("admin6@test.com", "password123").await;

    let expense = submit_expense(&app, &emp_token, "20.00").await;
    let id = expense["id"].as_str().unwrap();

    let reject = app
        .request(
            "PUT",
            &format!("/api/expenses/{id}/status"),
            Some(serde_json::json!({ "status": "rejected", "reason": "Too vague" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(reject.status, StatusCode::OK);

    // Owner edits the rejected expense; it must go back through review.
    let update = app
        .multipart_request(
            "PUT",
            &format!("/api/expenses/{id}"),
            &[("notes", "Taxi, with itemized receipt attached")],
            None,
            &emp_token,
        )
        .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["status"], "pending");
    assert!(update.body["data"]["rejection_reason"].is_null());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn uppercase_decision_status_is_accepted() {
    let app = TestApp::new().await;
    app.create_test_user("emp8@test.com", "password123", "employee")
        .await;
    app.create_test_user("admin8@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp8@test.com", "password123").await;
    let admin_token = app.login("admin8@test.com", "password123").await;

    let expense = submit_expense(&app, &emp_token, "20.00").await;

    let approve = app
        .request(
            "PUT",
            &format!("/api/expenses/{}/status", expense["id"].as_str().unwrap()),
            Some(serde_json::json!({ "status": "APPROVED" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(approve.status, StatusCode::OK);
    assert_eq!(approve.body["data"]["status"], "approved");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn limit_is_accepted_as_page_size() {
    let app = TestApp::new().await;
    app.create_test_user("emp9@test.com", "password123", "employee")
        .await;
    let token = app.login("emp9@test.com", "password123").await;

    submit_expense(&app, &token, "10.00").await;
    submit_expense(&app, &token, "20.00").await;
    submit_expense(&app, &token, "30.00").await;

    let list = app
        .request("GET", "/api/expenses?page=1&limit=2", None, Some(&token))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(list.body["data"]["page_size"], 2);
    assert_eq!(list.body["data"]["total_items"], 3);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn failed_submission_leaves_no_receipt_file() {
    let app = TestApp::new().await;
    app.create_test_user("orphan@test.com", "password123", "employee")
        .await;
    let token = app.login("orphan@test.com", "password123").await;

    // Out-of-range amount, so the expense row is never created.
    let response = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "-5.00"),
                ("category", "meals"),
                ("expense_date", "2026-08-02"),
            ],
            Some(("image/png", PNG_BYTES)),
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.receipt_file_count(), 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn replacing_receipt_removes_old_file() {
    let app = TestApp::new().await;
    app.create_test_user("replace@test.com", "password123", "employee")
        .await;
    let token = app.login("replace@test.com", "password123").await;

    let created = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "12.00"),
                ("category", "meals"),
                ("expense_date", "2026-08-02"),
            ],
            Some(("image/png", PNG_BYTES)),
            &token,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    let old_path = created.body["data"]["receipt_path"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(app.receipt_file_count(), 1);

    let updated = app
        .multipart_request(
            "PUT",
            &format!("/api/expenses/{id}"),
            &[],
            Some(("application/pdf", b"%PDF-1.4")),
            &token,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let new_path = updated.body["data"]["receipt_path"].as_str().unwrap();
    assert_ne!(new_path, old_path);
    assert_eq!(app.receipt_file_count(), 1);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn receipt_download_respects_ownership() {
    let app = TestApp::new().await;
    app.create_test_user("dl-owner@test.com", "password123", "employee")
        .await;
    app.create_test_user("dl-other@test.com", "password123", "employee")
        .await;
    let owner_token = app.login("dl-owner@test.com", "password123").await;
    let other_token = app.login("dl-other@test.com", "password123").await;

    let created = app
        .multipart_request(
            "POST",
            "/api/expenses",
            &[
                ("amount", "12.00"),
                ("category", "meals"),
                ("expense_date", "2026-08-02"),
            ],
            Some(("image/png", PNG_BYTES)),
            &owner_token,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/expenses/{id}/receipt");

    let (status, content_type, _) = app.request_raw(&path, &owner_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/png");

    let (status, _, _) = app.request_raw(&path, &other_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An expense without a receipt has nothing to download.
    let bare = submit_expense(&app, &owner_token, "5.00").await;
    let bare_path = format!("/api/expenses/{}/receipt", bare["id"].as_str().unwrap());
    let (status, _, _) = app.request_raw(&bare_path, &owner_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn export_is_admin_only_csv() {
    let app = TestApp::new().await;
    app.create_test_user("emp7@test.com", "password123", "employee")
        .await;
    app.create_test_user("admin7@test.com", "password123", "admin")
        .await;
    let emp_token = app.login("emp7@test.com", "password123").await;
    let admin_token = app.login("admin7@test.com", "password123").await;

    submit_expense(&app, &emp_token, "15.00").await;

    let (status, content_type, body) = app.request_raw("/api/expenses/export", &admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/csv"));
    assert!(body.starts_with("id,user_id,amount,category,expense_date,status"));
    assert!(body.contains("15.00"));

    let (status, _, _) = app.request_raw("/api/expenses/export", &emp_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
