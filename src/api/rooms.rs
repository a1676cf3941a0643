use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{ApiJson, validate_record_id};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::models::{Room, RoomFilter, RoomPatch};
use crate::services::{CreateRoomRequest, RoomError};

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::NotFound => Self::NotFound(err.to_string()),
            RoomError::Validation(msg) => Self::validation(msg),
            RoomError::Forbidden(denied) => denied.into(),
            RoomError::Database(msg) => Self::DatabaseError(msg),
            RoomError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /rooms
/// Public catalog, optionally filtered by `?status=` and `?type=`
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RoomFilter>,
) -> Result<Json<ApiResponse<Vec<Room>>>, ApiError> {
    let rooms = state.room_service().list(filter).await?;
    Ok(Json(ApiResponse::success(rooms)))
}

/// GET /rooms/{id}
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let id = validate_record_id(&id)?;
    let room = state.room_service().get(id).await?;
    Ok(Json(ApiResponse::success(room)))
}

/// POST /rooms
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state
        .room_service()
        .create(&user.principal(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room))))
}

/// PUT /rooms/{id}
pub async fn update_room(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<RoomPatch>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let id = validate_record_id(&id)?;
    let room = state
        .room_service()
        .update(&user.principal(), id, patch)
        .await?;
    Ok(Json(ApiResponse::success(room)))
}

/// DELETE /rooms/{id}
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_record_id(&id)?;
    state.room_service().delete(&user.principal(), id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Room deleted successfully",
    ))))
}
