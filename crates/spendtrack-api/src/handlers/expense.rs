//! Expense CRUD, decision, and export handlers.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use spendtrack_core::error::AppError;
use spendtrack_core::types::pagination::PageResponse;
use spendtrack_entity::expense::model::{CreateExpense, UpdateExpense};
use spendtrack_entity::expense::{Expense, ExpenseCategory};
use spendtrack_service::expense::ExpenseDecision;

use crate::dto::request::{ExpenseQueryParams, StatusUpdateRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::receipt::content_type_for;
use crate::state::AppState;

/// Fields accepted in the multipart expense form. All optional here;
/// create checks the required ones afterwards.
#[derive(Debug, Default)]
struct ExpenseForm {
    amount: Option<Decimal>,
    category: Option<ExpenseCategory>,
    expense_date: Option<NaiveDate>,
    notes: Option<String>,
    /// Buffered receipt upload: content type and raw bytes. Nothing is
    /// written to disk until the rest of the request has been validated.
    receipt: Option<(String, Bytes)>,
}

impl ExpenseForm {
    /// Persists the buffered receipt, if any, returning the stored filename.
    async fn store_receipt(&self, state: &AppState) -> Result<Option<String>, ApiError> {
        match &self.receipt {
            Some((content_type, data)) => {
                let filename = state.receipt_store.save(content_type, data).await?;
                Ok(Some(filename))
            }
            None => Ok(None),
        }
    }
}

/// GET /api/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ExpenseQueryParams>,
) -> Result<Json<ApiResponse<PageResponse<Expense>>>, ApiError> {
    let filter = params.into_filter()?;
    let page = pagination.into_page_request();

    let result = state.expense_service.list(&auth, filter, page).await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/expenses/{id}
pub async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let expense = state.expense_service.get(&auth, id).await?;

    Ok(Json(ApiResponse::ok(expense)))
}

/// POST /api/expenses — multipart form with optional receipt file
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Expense>>), ApiError> {
    let form = read_expense_form(multipart).await?;

    let amount = form
        .amount
        .ok_or_else(|| AppError::validation("amount is required"))?;
    let category = form
        .category
        .ok_or_else(|| AppError::validation("category is required"))?;
    let expense_date = form
        .expense_date
        .ok_or_else(|| AppError::validation("expense_date is required"))?;

    let receipt_path = form.store_receipt(&state).await?;

    let data = CreateExpense {
        user_id: auth.user_id,
        amount,
        category,
        expense_date,
        notes: form.notes,
        receipt_path: receipt_path.clone(),
    };

    match state.expense_service.create(&auth, data).await {
        Ok(expense) => Ok((StatusCode::CREATED, Json(ApiResponse::ok(expense)))),
        Err(e) => {
            // The row was never created, so the stored file is an orphan.
            if let Some(filename) = &receipt_path {
                state.receipt_store.remove(filename).await;
            }
            Err(e.into())
        }
    }
}

/// PUT /api/expenses/{id} — multipart form, partial update
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let form = read_expense_form(multipart).await?;

    // Existence and ownership are checked before any file is written.
    let existing = state.expense_service.get(&auth, id).await?;

    let receipt_path = form.store_receipt(&state).await?;

    let data = UpdateExpense {
        amount: form.amount,
        category: form.category,
        expense_date: form.expense_date,
        notes: form.notes,
        receipt_path: receipt_path.clone(),
    };

    match state.expense_service.update(&auth, id, data).await {
        Ok(expense) => {
            // The replaced file no longer has a referencing row.
            if receipt_path.is_some() {
                if let Some(old) = existing.receipt_path.as_deref() {
                    state.receipt_store.remove(old).await;
                }
            }
            Ok(Json(ApiResponse::ok(expense)))
        }
        Err(e) => {
            if let Some(filename) = &receipt_path {
                state.receipt_store.remove(filename).await;
            }
            Err(e.into())
        }
    }
}

/// GET /api/expenses/{id}/receipt — receipt file download
pub async fn download_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let expense = state.expense_service.get(&auth, id).await?;
    let filename = expense
        .receipt_path
        .as_deref()
        .ok_or_else(|| AppError::not_found("Expense has no receipt"))?;

    let path = state.receipt_store.resolve(filename)?;
    let data = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::not_found("Receipt file not found"))?;

    let content_type = content_type_for(filename).unwrap_or("application/octet-stream");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// PUT /api/expenses/{id}/status — admin decision
pub async fn decide_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Expense>>, ApiError> {
    let decision = ExpenseDecision::parse(&payload.status, payload.reason)?;

    let expense = state.expense_service.decide(&auth, id, decision).await?;

    Ok(Json(ApiResponse::ok(expense)))
}

/// GET /api/expenses/export — CSV download
pub async fn export_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ExpenseQueryParams>,
) -> Result<Response, ApiError> {
    let filter = params.into_filter()?;
    let csv = state.expense_service.export_csv(&auth, filter).await?;

    csv_attachment(csv, "expenses.csv")
}

/// Builds a CSV download response with attachment headers.
pub(crate) fn csv_attachment(csv: String, filename: &str) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// Drains the multipart stream into an [`ExpenseForm`]. The receipt file,
/// if one was sent, is buffered in memory, not yet persisted.
async fn read_expense_form(mut multipart: Multipart) -> Result<ExpenseForm, ApiError> {
    let mut form = ExpenseForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "amount" => {
                let text = read_text(field).await?;
                let amount = text
                    .trim()
                    .parse::<Decimal>()
                    .map_err(|_| AppError::validation("Invalid amount"))?;
                form.amount = Some(amount);
            }
            "category" => {
                let text = read_text(field).await?;
                form.category = Some(text.trim().parse()?);
            }
            "expense_date" => {
                let text = read_text(field).await?;
                let date = text
                    .trim()
                    .parse::<NaiveDate>()
                    .map_err(|_| AppError::validation("Invalid expense_date, expected YYYY-MM-DD"))?;
                form.expense_date = Some(date);
            }
            "notes" => {
                form.notes = Some(read_text(field).await?);
            }
            "receipt" => {
                let content_type = field
                    .content_type()
                    .ok_or_else(|| AppError::validation("Receipt is missing a content type"))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read receipt: {e}")))?;

                form.receipt = Some((content_type, data));
            }
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Invalid form field: {e}")).into())
}
