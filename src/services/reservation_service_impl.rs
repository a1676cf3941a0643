//! `SeaORM` implementation of the `ReservationService` trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::Store;
use crate::domain::{Principal, ReservationStatus};
use crate::models::{
    NewReservation, Reservation, ReservationDetails, ReservationFilter, ReservationPatch,
};
use crate::services::pricing::BookingWindow;
use crate::services::reservation_service::{
    BookingRequest, ReservationError, ReservationService,
};

const UNKNOWN_ROOM: &str = "Unknown Room";
const UNKNOWN_USER: &str = "Unknown User";

pub struct SeaOrmReservationService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmReservationService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn load(&self, id: &str) -> Result<Reservation, ReservationError> {
        self.store
            .get_reservation(id)
            .await?
            .ok_or(ReservationError::NotFound)
    }

    /// Rejects `window` when overlap rejection is on and another reservation
    /// for the room still holds an overlapping slot. Read-then-write: two
    /// concurrent bookings can both pass.
    async fn check_slot_free(
        &self,
        room_id: &str,
        window: &BookingWindow,
        ignore_id: Option<&str>,
    ) -> Result<(), ReservationError> {
        if !self.config.read().await.bookings.reject_overlaps {
            return Ok(());
        }

        let existing = self
            .store
            .active_reservations_for_room(room_id, &window.date_string())
            .await?;

        let clash = existing
            .iter()
            .filter(|r| Some(r.id.as_str()) != ignore_id)
            .filter_map(|r| BookingWindow::parse(&r.date, &r.start_time, &r.end_time).ok())
            .any(|other| other.overlaps(window));

        if clash {
            return Err(ReservationError::SlotTaken);
        }
        Ok(())
    }

    /// Attaches room names, and user names when `with_user_names` is set.
    async fn enrich(
        &self,
        reservations: Vec<Reservation>,
        with_user_names: bool,
    ) -> Result<Vec<ReservationDetails>, ReservationError> {
        let mut room_ids: Vec<String> = reservations.iter().map(|r| r.room_id.clone()).collect();
        room_ids.sort_unstable();
        room_ids.dedup();
        let rooms = self.store.room_names(&room_ids).await?;

        let users = if with_user_names {
            let mut user_ids: Vec<String> =
                reservations.iter().map(|r| r.user_id.clone()).collect();
            user_ids.sort_unstable();
            user_ids.dedup();
            Some(self.store.user_names(&user_ids).await?)
        } else {
            None
        };

        Ok(reservations
            .into_iter()
            .map(|reservation| details(reservation, &rooms, users.as_ref()))
            .collect())
    }
}

fn details(
    reservation: Reservation,
    rooms: &HashMap<String, String>,
    users: Option<&HashMap<String, String>>,
) -> ReservationDetails {
    let room_name = rooms
        .get(&reservation.room_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_ROOM.to_string());
    let user_name = users.map(|names| {
        names
            .get(&reservation.user_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    });

    ReservationDetails {
        reservation,
        room_name,
        user_name,
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ReservationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReservationError::Validation(format!("{field} is required")))
}

#[async_trait]
impl ReservationService for SeaOrmReservationService {
    async fn create(
        &self,
        caller: &Principal,
        request: BookingRequest,
    ) -> Result<Reservation, ReservationError> {
        let room_id = required(request.room_id, "Room")?;
        let user_id = required(request.user_id, "User")?;
        let date = required(request.date, "Date")?;
        let start_time = required(request.start_time, "Start time")?;
        let end_time = required(request.end_time, "End time")?;

        caller.ensure_owner_or_admin(&user_id)?;

        let room = self
            .store
            .get_room(&room_id)
            .await?
            .ok_or(ReservationError::RoomNotFound)?;

        let window = BookingWindow::parse(&date, &start_time, &end_time)?;

        let (total_price, status) = if caller.is_admin() {
            (
                request
                    .total_price
                    .unwrap_or_else(|| window.total_price(room.price_per_hour)),
                request.status.unwrap_or_default(),
            )
        } else {
            (
                window.total_price(room.price_per_hour),
                ReservationStatus::Pending,
            )
        };

        if total_price < 0.0 || !total_price.is_finite() {
            return Err(ReservationError::Validation(
                "Total price cannot be negative".to_string(),
            ));
        }

        if status.holds_slot() {
            self.check_slot_free(&room.id, &window, None).await?;
        }

        let reservation = self
            .store
            .create_reservation(&NewReservation {
                room_id: room.id,
                user_id,
                date: window.date_string(),
                start_time: window.start_time(),
                end_time: window.end_time(),
                status,
                total_price,
            })
            .await?;

        metrics::counter!("reservations_created_total").increment(1);
        info!(
            reservation_id = %reservation.id,
            room_id = %reservation.room_id,
            user_id = %reservation.user_id,
            hours = window.hours(),
            total_price,
            "Reservation created"
        );

        Ok(reservation)
    }

    async fn list_all(
        &self,
        caller: &Principal,
        filter: ReservationFilter,
    ) -> Result<Vec<ReservationDetails>, ReservationError> {
        caller.ensure_admin()?;

        let reservations = self.store.list_reservations(&filter).await?;
        self.enrich(reservations, true).await
    }

    async fn get(
        &self,
        caller: &Principal,
        id: &str,
    ) -> Result<ReservationDetails, ReservationError> {
        let reservation = self.load(id).await?;
        caller.ensure_owner_or_admin(&reservation.user_id)?;

        let mut enriched = self.enrich(vec![reservation], true).await?;
        enriched.pop().ok_or(ReservationError::NotFound)
    }

    async fn list_for_user(
        &self,
        caller: &Principal,
        user_id: &str,
    ) -> Result<Vec<ReservationDetails>, ReservationError> {
        caller.ensure_owner_or_admin(user_id)?;

        let filter = ReservationFilter {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        };
        let reservations = self.store.list_reservations(&filter).await?;
        self.enrich(reservations, false).await
    }

    async fn update(
        &self,
        caller: &Principal,
        id: &str,
        mut patch: ReservationPatch,
    ) -> Result<Reservation, ReservationError> {
        caller.ensure_admin()?;

        if let Some(price) = patch.total_price
            && (price < 0.0 || !price.is_finite())
        {
            return Err(ReservationError::Validation(
                "Total price cannot be negative".to_string(),
            ));
        }

        let existing = self.load(id).await?;

        let status = patch.status.unwrap_or(existing.status);
        // A cancelled booking gave its slot up; taking it back is a new claim.
        let reclaims_slot =
            existing.status == ReservationStatus::Cancelled && status.holds_slot();

        if patch.changes_schedule() || reclaims_slot {
            let window = BookingWindow::parse(
                patch.date.as_deref().unwrap_or(&existing.date),
                patch.start_time.as_deref().unwrap_or(&existing.start_time),
                patch.end_time.as_deref().unwrap_or(&existing.end_time),
            )?;

            if status.holds_slot() {
                self.check_slot_free(&existing.room_id, &window, Some(id))
                    .await?;
            }

            if patch.changes_schedule() {
                if patch.total_price.is_none() {
                    let room = self
                        .store
                        .get_room(&existing.room_id)
                        .await?
                        .ok_or(ReservationError::RoomNotFound)?;
                    patch.total_price = Some(window.total_price(room.price_per_hour));
                }

                patch.date = Some(window.date_string());
                patch.start_time = Some(window.start_time());
                patch.end_time = Some(window.end_time());
            }
        }

        let updated = self
            .store
            .update_reservation(id, &patch)
            .await?
            .ok_or(ReservationError::NotFound)?;

        debug!(reservation_id = %id, status = %updated.status, "Reservation updated");
        Ok(updated)
    }

    async fn cancel(
        &self,
        caller: &Principal,
        id: &str,
    ) -> Result<Reservation, ReservationError> {
        let existing = self.load(id).await?;
        caller.ensure_owner_or_admin(&existing.user_id)?;

        if existing.status == ReservationStatus::Cancelled {
            return Ok(existing);
        }

        let patch = ReservationPatch {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };

        let cancelled = self
            .store
            .update_reservation(id, &patch)
            .await?
            .ok_or(ReservationError::NotFound)?;

        info!(reservation_id = %id, by = %caller.user_id, "Reservation cancelled");
        Ok(cancelled)
    }

    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), ReservationError> {
        caller.ensure_admin()?;

        if !self.store.delete_reservation(id).await? {
            return Err(ReservationError::NotFound);
        }

        info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }
}
