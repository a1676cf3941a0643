//! `SeaORM` implementation of the `RoomService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::Principal;
use crate::models::{NewRoom, Room, RoomFilter, RoomPatch};
use crate::services::room_service::{CreateRoomRequest, RoomError, RoomService};

pub struct SeaOrmRoomService {
    store: Store,
}

impl SeaOrmRoomService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_price(price: f64) -> Result<(), RoomError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(RoomError::Validation(
                "Price per hour must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_text(value: &str, field: &str) -> Result<(), RoomError> {
        if value.trim().is_empty() {
            return Err(RoomError::Validation(format!("{field} cannot be empty")));
        }
        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, RoomError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RoomError::Validation(format!("{field} is required")))
}

#[async_trait]
impl RoomService for SeaOrmRoomService {
    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, RoomError> {
        Ok(self.store.list_rooms(&filter).await?)
    }

    async fn get(&self, id: &str) -> Result<Room, RoomError> {
        self.store.get_room(id).await?.ok_or(RoomError::NotFound)
    }

    async fn create(
        &self,
        caller: &Principal,
        request: CreateRoomRequest,
    ) -> Result<Room, RoomError> {
        caller.ensure_admin()?;

        let name = required(request.name, "Name")?;
        let room_type = required(request.room_type, "Type")?;
        let capacity = required(request.capacity, "Capacity")?;
        let price_per_hour = request
            .price_per_hour
            .ok_or_else(|| RoomError::Validation("Price per hour is required".to_string()))?;
        Self::validate_price(price_per_hour)?;

        let room = self
            .store
            .create_room(&NewRoom {
                name,
                description: request.description.unwrap_or_default(),
                room_type,
                capacity,
                price_per_hour,
                amenities: request.amenities.unwrap_or_default(),
                images: request.images.unwrap_or_default(),
                status: request.status.unwrap_or_default(),
            })
            .await?;

        info!(admin = %caller.user_id, room_id = %room.id, "Room created");
        Ok(room)
    }

    async fn update(
        &self,
        caller: &Principal,
        id: &str,
        patch: RoomPatch,
    ) -> Result<Room, RoomError> {
        caller.ensure_admin()?;

        if let Some(price) = patch.price_per_hour {
            Self::validate_price(price)?;
        }
        if let Some(name) = &patch.name {
            Self::validate_text(name, "Name")?;
        }
        if let Some(room_type) = &patch.room_type {
            Self::validate_text(room_type, "Type")?;
        }
        if let Some(capacity) = &patch.capacity {
            Self::validate_text(capacity, "Capacity")?;
        }

        self.store
            .update_room(id, &patch)
            .await?
            .ok_or(RoomError::NotFound)
    }

    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), RoomError> {
        caller.ensure_admin()?;

        if !self.store.delete_room(id).await? {
            return Err(RoomError::NotFound);
        }

        info!(admin = %caller.user_id, room_id = %id, "Room deleted");
        Ok(())
    }
}
