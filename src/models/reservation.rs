use serde::{Deserialize, Serialize};

use crate::domain::ReservationStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: ReservationStatus,
    pub total_price: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A reservation enriched with the names of the room and user it points at.
/// Dangling references resolve to placeholder names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub room_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Fully computed reservation, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub room_id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: ReservationStatus,
    pub total_price: f64,
}

/// Fields an admin may change on an existing reservation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReservationPatch {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<ReservationStatus>,
    pub total_price: Option<f64>,
}

impl ReservationPatch {
    #[must_use]
    pub const fn changes_schedule(&self) -> bool {
        self.date.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    pub user_id: Option<String>,
    pub room_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<ReservationStatus>,
}
