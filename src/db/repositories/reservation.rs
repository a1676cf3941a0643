use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

use crate::domain::{ReservationStatus, new_record_id, now_timestamp};
use crate::entities::{prelude::*, reservations};
use crate::models::{NewReservation, Reservation, ReservationFilter, ReservationPatch};

pub struct ReservationRepository {
    conn: DatabaseConnection,
}

impl ReservationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: reservations::Model) -> Reservation {
        Reservation {
            id: model.id,
            room_id: model.room_id,
            user_id: model.user_id,
            date: model.date,
            start_time: model.start_time,
            end_time: model.end_time,
            status: model
                .status
                .parse()
                .unwrap_or(ReservationStatus::Pending),
            total_price: model.total_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    pub async fn create(&self, reservation: &NewReservation) -> Result<Reservation> {
        let now = now_timestamp();

        let active = reservations::ActiveModel {
            id: Set(new_record_id()),
            room_id: Set(reservation.room_id.clone()),
            user_id: Set(reservation.user_id.clone()),
            date: Set(reservation.date.clone()),
            start_time: Set(reservation.start_time.clone()),
            end_time: Set(reservation.end_time.clone()),
            status: Set(reservation.status.to_string()),
            total_price: Set(reservation.total_price),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert reservation")?;

        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Reservation>> {
        let result = Reservations::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query reservation by ID")?;

        Ok(result.map(Self::map_model))
    }

    /// Newest bookings first, then by slot within a day.
    pub async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let mut query = Reservations::find();

        if let Some(user_id) = &filter.user_id {
            query = query.filter(reservations::Column::UserId.eq(user_id.as_str()));
        }
        if let Some(room_id) = &filter.room_id {
            query = query.filter(reservations::Column::RoomId.eq(room_id.as_str()));
        }
        if let Some(date) = &filter.date {
            query = query.filter(reservations::Column::Date.eq(date.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(reservations::Column::Status.eq(status.as_str()));
        }

        let rows = query
            .order_by_desc(reservations::Column::Date)
            .order_by_asc(reservations::Column::StartTime)
            .order_by_desc(reservations::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list reservations")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Reservations that still hold a slot in `room_id` on `date`.
    pub async fn active_for_room_on_date(
        &self,
        room_id: &str,
        date: &str,
    ) -> Result<Vec<Reservation>> {
        let rows = Reservations::find()
            .filter(reservations::Column::RoomId.eq(room_id))
            .filter(reservations::Column::Date.eq(date))
            .filter(reservations::Column::Status.ne(ReservationStatus::Cancelled.as_str()))
            .order_by_asc(reservations::Column::StartTime)
            .all(&self.conn)
            .await
            .context("Failed to query reservations for room")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn update(&self, id: &str, patch: &ReservationPatch) -> Result<Option<Reservation>> {
        let Some(existing) = Reservations::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query reservation for update")?
        else {
            return Ok(None);
        };

        let mut active: reservations::ActiveModel = existing.into();
        if let Some(date) = &patch.date {
            active.date = Set(date.clone());
        }
        if let Some(start) = &patch.start_time {
            active.start_time = Set(start.clone());
        }
        if let Some(end) = &patch.end_time {
            active.end_time = Set(end.clone());
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(price) = patch.total_price {
            active.total_price = Set(price);
        }
        active.updated_at = Set(now_timestamp());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update reservation")?;

        Ok(Some(Self::map_model(model)))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Reservations::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete reservation")?;

        Ok(result.rows_affected > 0)
    }

    /// Reservation counts per status; statuses with no rows map to zero.
    pub async fn count_by_status(&self) -> Result<HashMap<ReservationStatus, u64>> {
        let mut counts = HashMap::new();
        for status in ReservationStatus::ALL {
            let count = Reservations::find()
                .filter(reservations::Column::Status.eq(status.as_str()))
                .count(&self.conn)
                .await
                .context("Failed to count reservations")?;
            counts.insert(status, count);
        }
        Ok(counts)
    }

    /// Sum of `total_price` over confirmed reservations.
    pub async fn confirmed_revenue(&self) -> Result<f64> {
        let prices: Vec<f64> = Reservations::find()
            .select_only()
            .column(reservations::Column::TotalPrice)
            .filter(reservations::Column::Status.eq(ReservationStatus::Confirmed.as_str()))
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to sum reservation revenue")?;

        Ok(prices.into_iter().sum())
    }
}
