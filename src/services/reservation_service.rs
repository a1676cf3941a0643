//! Domain service for the reservation workflow.
//!
//! Creating a reservation resolves the room, turns the requested slot into a
//! whole number of hours, prices it against the room's hourly rate and stores
//! it as pending. Listings are enriched with room and user names.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AccessDenied, Principal, ReservationStatus};
use crate::models::{Reservation, ReservationDetails, ReservationFilter, ReservationPatch};
use crate::services::pricing::PricingError;

/// Errors specific to reservation operations.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation not found")]
    NotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Room is already booked for this time slot")]
    SlotTaken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PricingError> for ReservationError {
    fn from(err: PricingError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<sea_orm::DbErr> for ReservationError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReservationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Body of a booking. `totalPrice` and `status` are honored for admin
/// callers only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: Option<String>,
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_price: Option<f64>,
    pub status: Option<ReservationStatus>,
}

/// Domain service trait for reservations.
#[async_trait::async_trait]
pub trait ReservationService: Send + Sync {
    /// Runs the booking workflow and persists the result.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::Validation`] for missing fields, malformed dates
    ///   or times, or an end time not after the start time.
    /// - [`ReservationError::RoomNotFound`] if the room does not exist.
    /// - [`ReservationError::Forbidden`] if a non-admin books for someone else.
    /// - [`ReservationError::SlotTaken`] if overlap rejection is enabled and
    ///   the slot is held by another reservation.
    async fn create(
        &self,
        caller: &Principal,
        request: BookingRequest,
    ) -> Result<Reservation, ReservationError>;

    /// Lists all reservations with room and user names. Admin only.
    async fn list_all(
        &self,
        caller: &Principal,
        filter: ReservationFilter,
    ) -> Result<Vec<ReservationDetails>, ReservationError>;

    /// Gets one reservation with room and user names. Owner or admin.
    async fn get(&self, caller: &Principal, id: &str)
    -> Result<ReservationDetails, ReservationError>;

    /// Lists one user's reservations with room names. Owner or admin.
    async fn list_for_user(
        &self,
        caller: &Principal,
        user_id: &str,
    ) -> Result<Vec<ReservationDetails>, ReservationError>;

    /// Applies an admin patch. A schedule change re-prices the reservation
    /// unless the patch sets `totalPrice` itself.
    async fn update(
        &self,
        caller: &Principal,
        id: &str,
        patch: ReservationPatch,
    ) -> Result<Reservation, ReservationError>;

    /// Marks a reservation cancelled. Owner or admin.
    async fn cancel(&self, caller: &Principal, id: &str)
    -> Result<Reservation, ReservationError>;

    /// Deletes a reservation. Admin only.
    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), ReservationError>;
}
