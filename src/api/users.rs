use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{ApiJson, validate_record_id};
use super::{
    ApiError, ApiResponse, AppState, MessageResponse, RoleUpdateRequest, StatusUpdateRequest,
};
use crate::models::{User, UserPatch};
use crate::services::{CreateUserRequest, UserError};

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::NotFound(err.to_string()),
            UserError::Validation(msg) => Self::validation(msg),
            UserError::EmailTaken => Self::Conflict(err.to_string()),
            UserError::Forbidden(denied) => denied.into(),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service().list(&user.principal()).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_record_id(&id)?;
    let found = state.user_service().get(&user.principal(), id).await?;
    Ok(Json(ApiResponse::success(found)))
}

/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .user_service()
        .create(&user.principal(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_record_id(&id)?;
    let updated = state
        .user_service()
        .update(&user.principal(), id, patch)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// PUT /users/{id}/role
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<RoleUpdateRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_record_id(&id)?;
    let role = payload
        .role
        .ok_or_else(|| ApiError::validation("Role is required"))?;
    let updated = state
        .user_service()
        .change_role(&user.principal(), id, role)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// PUT /users/{id}/status
pub async fn update_user_status(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = validate_record_id(&id)?;
    let status = payload
        .status
        .ok_or_else(|| ApiError::validation("Status is required"))?;
    let updated = state
        .user_service()
        .change_status(&user.principal(), id, status)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_record_id(&id)?;
    state.user_service().delete(&user.principal(), id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User deleted successfully",
    ))))
}
