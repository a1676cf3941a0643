use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use tracing::info;

use crate::domain::{ActiveStatus, new_record_id, now_timestamp};
use crate::entities::{prelude::*, rooms};
use crate::models::{NewRoom, Room, RoomFilter, RoomPatch};

/// Repository for the room catalog
pub struct RoomRepository {
    conn: DatabaseConnection,
}

impl RoomRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_room_model(model: rooms::Model) -> Room {
        Room {
            id: model.id,
            name: model.name,
            description: model.description,
            room_type: model.room_type,
            capacity: model.capacity,
            price_per_hour: model.price_per_hour,
            amenities: serde_json::from_str(&model.amenities).unwrap_or_default(),
            images: serde_json::from_str(&model.images).unwrap_or_default(),
            status: model.status.parse().unwrap_or(ActiveStatus::Inactive),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn to_active_model(room: &NewRoom, now: &str) -> Result<rooms::ActiveModel> {
        Ok(rooms::ActiveModel {
            id: Set(new_record_id()),
            name: Set(room.name.clone()),
            description: Set(room.description.clone()),
            room_type: Set(room.room_type.clone()),
            capacity: Set(room.capacity.clone()),
            price_per_hour: Set(room.price_per_hour),
            amenities: Set(serde_json::to_string(&room.amenities)?),
            images: Set(serde_json::to_string(&room.images)?),
            status: Set(room.status.to_string()),
            created_at: Set(now.to_string()),
            updated_at: Set(now.to_string()),
        })
    }

    // ========================================================================
    // Room Operations
    // ========================================================================

    pub async fn create(&self, room: &NewRoom) -> Result<Room> {
        let active = Self::to_active_model(room, &now_timestamp())?;

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert room")?;

        info!("Created room '{}' ({})", model.name, model.id);
        Ok(Self::map_room_model(model))
    }

    /// Bulk insert used by catalog seeding.
    pub async fn create_many(&self, rooms_to_add: &[NewRoom]) -> Result<usize> {
        if rooms_to_add.is_empty() {
            return Ok(0);
        }

        let now = now_timestamp();
        let models = rooms_to_add
            .iter()
            .map(|room| Self::to_active_model(room, &now))
            .collect::<Result<Vec<_>>>()?;

        Rooms::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to insert rooms")?;

        Ok(rooms_to_add.len())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Room>> {
        let result = Rooms::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query room by ID")?;

        Ok(result.map(Self::map_room_model))
    }

    pub async fn list(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        let mut query = Rooms::find();

        if let Some(status) = filter.status {
            query = query.filter(rooms::Column::Status.eq(status.as_str()));
        }
        if let Some(room_type) = &filter.room_type {
            query = query.filter(rooms::Column::RoomType.eq(room_type.as_str()));
        }

        let rows = query
            .order_by_asc(rooms::Column::CreatedAt)
            .order_by_asc(rooms::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list rooms")?;

        Ok(rows.into_iter().map(Self::map_room_model).collect())
    }

    pub async fn update(&self, id: &str, patch: &RoomPatch) -> Result<Option<Room>> {
        let Some(room) = Rooms::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query room for update")?
        else {
            return Ok(None);
        };

        let mut active: rooms::ActiveModel = room.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(room_type) = &patch.room_type {
            active.room_type = Set(room_type.clone());
        }
        if let Some(capacity) = &patch.capacity {
            active.capacity = Set(capacity.clone());
        }
        if let Some(price) = patch.price_per_hour {
            active.price_per_hour = Set(price);
        }
        if let Some(amenities) = &patch.amenities {
            active.amenities = Set(serde_json::to_string(amenities)?);
        }
        if let Some(images) = &patch.images {
            active.images = Set(serde_json::to_string(images)?);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(now_timestamp());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update room")?;

        Ok(Some(Self::map_room_model(model)))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Rooms::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete room")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self, status: Option<ActiveStatus>) -> Result<u64> {
        let mut query = Rooms::find();
        if let Some(status) = status {
            query = query.filter(rooms::Column::Status.eq(status.as_str()));
        }

        query
            .count(&self.conn)
            .await
            .context("Failed to count rooms")
    }

    /// Display names keyed by room id, for denormalizing reservation listings.
    pub async fn names_by_ids(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Rooms::find()
            .filter(rooms::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("Failed to query room names")?;

        Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
    }
}
