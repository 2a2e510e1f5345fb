//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use spendtrack_core::types::pagination::PageResponse;
use spendtrack_service::user::admin::{CreateUserData, UpdateUserData};

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = pagination.into_page_request();
    let result = state.user_service.list_users(&auth, page).await?;

    let result = PageResponse {
        items: result.items.into_iter().map(UserResponse::from).collect(),
        page: result.page,
        page_size: result.page_size,
        total_items: result.total_items,
        total_pages: result.total_pages,
        has_next: result.has_next,
        has_previous: result.has_previous,
    };

    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(&auth, id).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    payload.validate().map_err(ApiError::validation_failed)?;

    let user = state
        .user_service
        .create_user(
            &auth,
            CreateUserData {
                email: payload.email,
                password: payload.password,
                display_name: payload.display_name,
                role: payload.role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    payload.validate().map_err(ApiError::validation_failed)?;

    let user = state
        .user_service
        .update_user(
            &auth,
            id,
            UpdateUserData {
                email: payload.email,
                display_name: payload.display_name,
                role: payload.role,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.delete_user(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
