use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{ActiveStatus, ReservationStatus};
use crate::models::{
    NewReservation, NewRoom, Reservation, ReservationFilter, ReservationPatch, Room, RoomFilter,
    RoomPatch, User,
};

pub mod migrator;
pub mod repositories;

pub use repositories::user::{UserChanges, UserRecord};

/// Whether `err` carries a unique constraint violation raised by the database,
/// such as a duplicate email losing a race with a concurrent insert.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory database is its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn room_repo(&self) -> repositories::room::RoomRepository {
        repositories::room::RoomRepository::new(self.conn.clone())
    }

    fn reservation_repo(&self) -> repositories::reservation::ReservationRepository {
        repositories::reservation::ReservationRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(&self, record: UserRecord) -> Result<User> {
        self.user_repo().create(record).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        self.user_repo().get_with_password_by_email(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn update_user(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        self.user_repo().update(id, changes).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn count_users(&self, status: Option<ActiveStatus>) -> Result<u64> {
        self.user_repo().count(status).await
    }

    pub async fn user_names(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        self.user_repo().names_by_ids(ids).await
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    pub async fn create_room(&self, room: &NewRoom) -> Result<Room> {
        self.room_repo().create(room).await
    }

    pub async fn create_rooms(&self, rooms: &[NewRoom]) -> Result<usize> {
        self.room_repo().create_many(rooms).await
    }

    pub async fn get_room(&self, id: &str) -> Result<Option<Room>> {
        self.room_repo().get(id).await
    }

    pub async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        self.room_repo().list(filter).await
    }

    pub async fn update_room(&self, id: &str, patch: &RoomPatch) -> Result<Option<Room>> {
        self.room_repo().update(id, patch).await
    }

    pub async fn delete_room(&self, id: &str) -> Result<bool> {
        self.room_repo().delete(id).await
    }

    pub async fn count_rooms(&self, status: Option<ActiveStatus>) -> Result<u64> {
        self.room_repo().count(status).await
    }

    pub async fn room_names(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        self.room_repo().names_by_ids(ids).await
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Reservation> {
        self.reservation_repo().create(reservation).await
    }

    pub async fn get_reservation(&self, id: &str) -> Result<Option<Reservation>> {
        self.reservation_repo().get(id).await
    }

    pub async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        self.reservation_repo().list(filter).await
    }

    pub async fn active_reservations_for_room(
        &self,
        room_id: &str,
        date: &str,
    ) -> Result<Vec<Reservation>> {
        self.reservation_repo()
            .active_for_room_on_date(room_id, date)
            .await
    }

    pub async fn update_reservation(
        &self,
        id: &str,
        patch: &ReservationPatch,
    ) -> Result<Option<Reservation>> {
        self.reservation_repo().update(id, patch).await
    }

    pub async fn delete_reservation(&self, id: &str) -> Result<bool> {
        self.reservation_repo().delete(id).await
    }

    pub async fn reservation_counts(&self) -> Result<HashMap<ReservationStatus, u64>> {
        self.reservation_repo().count_by_status().await
    }

    pub async fn confirmed_revenue(&self) -> Result<f64> {
        self.reservation_repo().confirmed_revenue().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn sample_room(name: &str, room_type: &str) -> NewRoom {
        NewRoom {
            name: name.to_string(),
            description: String::new(),
            room_type: room_type.to_string(),
            capacity: "1-4".to_string(),
            price_per_hour: 25.0,
            amenities: vec!["WiFi".to_string(), "Whiteboard".to_string()],
            images: vec![],
            status: ActiveStatus::Active,
        }
    }

    #[tokio::test]
    async fn room_lists_round_trip_through_json_columns() {
        let store = memory_store().await;
        let room = store
            .create_room(&sample_room("Focus Booth", "booth"))
            .await
            .unwrap();

        let fetched = store.get_room(&room.id).await.unwrap().unwrap();
        assert_eq!(fetched.amenities, vec!["WiFi", "Whiteboard"]);
        assert!(fetched.images.is_empty());
    }

    #[tokio::test]
    async fn room_filter_by_type_and_status() {
        let store = memory_store().await;
        store
            .create_rooms(&[
                sample_room("A", "meeting"),
                sample_room("B", "desk"),
                NewRoom {
                    status: ActiveStatus::Inactive,
                    ..sample_room("C", "meeting")
                },
            ])
            .await
            .unwrap();

        let meeting = store
            .list_rooms(&RoomFilter {
                room_type: Some("meeting".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(meeting.len(), 2);

        let active_meeting = store
            .list_rooms(&RoomFilter {
                room_type: Some("meeting".to_string()),
                status: Some(ActiveStatus::Active),
            })
            .await
            .unwrap();
        assert_eq!(active_meeting.len(), 1);
        assert_eq!(active_meeting[0].name, "A");
    }

    #[tokio::test]
    async fn user_update_touches_only_given_columns() {
        let store = memory_store().await;
        let user = store
            .create_user(UserRecord {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Client,
                status: ActiveStatus::Active,
            })
            .await
            .unwrap();

        let updated = store
            .update_user(
                &user.id,
                UserChanges {
                    status: Some(ActiveStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.status, ActiveStatus::Inactive);

        let (_, hash) = store
            .get_user_with_password("jane@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hash, "hash");
    }

    #[tokio::test]
    async fn cancelled_reservations_release_their_slot() {
        let store = memory_store().await;
        let booking = |status, price| NewReservation {
            room_id: "room-1".to_string(),
            user_id: "user-1".to_string(),
            date: "2025-03-01".to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            status,
            total_price: price,
        };

        store
            .create_reservation(&booking(ReservationStatus::Pending, 80.0))
            .await
            .unwrap();
        store
            .create_reservation(&booking(ReservationStatus::Cancelled, 50.0))
            .await
            .unwrap();
        store
            .create_reservation(&booking(ReservationStatus::Confirmed, 40.0))
            .await
            .unwrap();

        let active = store
            .active_reservations_for_room("room-1", "2025-03-01")
            .await
            .unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|r| r.status.holds_slot()));

        let revenue = store.confirmed_revenue().await.unwrap();
        assert!((revenue - 40.0).abs() < f64::EPSILON);

        let counts = store.reservation_counts().await.unwrap();
        assert_eq!(counts[&ReservationStatus::Pending], 1);
        assert_eq!(counts[&ReservationStatus::Cancelled], 1);
        assert_eq!(counts[&ReservationStatus::Confirmed], 1);
    }

    #[tokio::test]
    async fn delete_missing_record_reports_false() {
        let store = memory_store().await;
        assert!(!store.delete_room("nope").await.unwrap());
        assert!(!store.delete_reservation("nope").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = memory_store().await;
        let record = UserRecord {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Client,
            status: ActiveStatus::Active,
        };
        store.create_user(record.clone()).await.unwrap();

        let err = store.create_user(record).await.unwrap_err();
        assert!(is_unique_violation(&err));

        let other = store
            .create_user(UserRecord {
                name: "John".to_string(),
                email: "john@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Client,
                status: ActiveStatus::Active,
            })
            .await
            .unwrap();
        let err = store
            .update_user(
                &other.id,
                UserChanges {
                    email: Some("jane@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));

        assert!(!is_unique_violation(&anyhow::anyhow!("connection reset")));
    }
}
