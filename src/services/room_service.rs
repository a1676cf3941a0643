//! Domain service for the room catalog.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AccessDenied, ActiveStatus, Principal};
use crate::models::{Room, RoomFilter, RoomPatch};

/// Errors specific to room operations.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for RoomError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RoomError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Body of a room creation. `name`, `type`, `capacity` and `pricePerHour`
/// are required; the rest default to an empty, active room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub capacity: Option<String>,
    pub price_per_hour: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ActiveStatus>,
}

/// Domain service trait for rooms.
#[async_trait::async_trait]
pub trait RoomService: Send + Sync {
    /// Lists rooms matching the filter. Public.
    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, RoomError>;

    /// Gets a single room. Public.
    async fn get(&self, id: &str) -> Result<Room, RoomError>;

    /// Creates a room. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::Validation`] when a required field is missing or
    /// the hourly price is not positive.
    async fn create(&self, caller: &Principal, request: CreateRoomRequest)
    -> Result<Room, RoomError>;

    /// Applies a patch. Admin only.
    async fn update(&self, caller: &Principal, id: &str, patch: RoomPatch)
    -> Result<Room, RoomError>;

    /// Deletes a room. Reservations pointing at it are left in place. Admin only.
    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), RoomError>;
}
