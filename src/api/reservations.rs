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
use crate::models::{Reservation, ReservationDetails, ReservationFilter, ReservationPatch};
use crate::services::{BookingRequest, ReservationError};

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound | ReservationError::RoomNotFound => {
                Self::NotFound(err.to_string())
            }
            ReservationError::Validation(msg) => Self::validation(msg),
            ReservationError::Forbidden(denied) => denied.into(),
            ReservationError::SlotTaken => Self::Conflict(err.to_string()),
            ReservationError::Database(msg) => Self::DatabaseError(msg),
            ReservationError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /reservations
/// Admin listing, optionally filtered by `?userId=`, `?roomId=`, `?date=`, `?status=`
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<ApiResponse<Vec<ReservationDetails>>>, ApiError> {
    let reservations = state
        .reservation_service()
        .list_all(&user.principal(), filter)
        .await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// POST /reservations
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .reservation_service()
        .create(&user.principal(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(reservation))))
}

/// GET /reservations/{id}
pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDetails>>, ApiError> {
    let id = validate_record_id(&id)?;
    let reservation = state
        .reservation_service()
        .get(&user.principal(), id)
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// GET /reservations/user/{user_id}
pub async fn list_user_reservations(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReservationDetails>>>, ApiError> {
    let user_id = validate_record_id(&user_id)?;
    let reservations = state
        .reservation_service()
        .list_for_user(&user.principal(), user_id)
        .await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// PUT /reservations/{id}
pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ReservationPatch>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let id = validate_record_id(&id)?;
    let reservation = state
        .reservation_service()
        .update(&user.principal(), id, patch)
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// POST /reservations/{id}/cancel
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let id = validate_record_id(&id)?;
    let reservation = state
        .reservation_service()
        .cancel(&user.principal(), id)
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// DELETE /reservations/{id}
pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_record_id(&id)?;
    state
        .reservation_service()
        .delete(&user.principal(), id)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Reservation deleted successfully",
    ))))
}
