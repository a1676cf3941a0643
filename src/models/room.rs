use serde::{Deserialize, Serialize};

use crate::domain::ActiveStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub room_type: String,
    /// Free text such as "1-3" or "Up to 30".
    pub capacity: String,
    pub price_per_hour: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub description: String,
    pub room_type: String,
    pub capacity: String,
    pub price_per_hour: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub status: ActiveStatus,
}

/// Fields an admin may change on an existing room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoomPatch {
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

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    pub status: Option<ActiveStatus>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
}
