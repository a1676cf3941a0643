//! First-run data: the default admin account and a sample room catalog.
//!
//! Seeding is idempotent. The admin is created only when no account uses the
//! configured email, and rooms are inserted only into an empty catalog.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::db::{Store, UserRecord};
use crate::domain::{ActiveStatus, UserRole};
use crate::models::NewRoom;
use crate::services::credentials;

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

struct SampleRoom {
    name: &'static str,
    description: &'static str,
    room_type: &'static str,
    capacity: &'static str,
    price_per_hour: f64,
    amenities: &'static [&'static str],
}

const SAMPLE_ROOMS: &[SampleRoom] = &[
    SampleRoom {
        name: "Executive Office",
        description: "A private office for executives and small teams.",
        room_type: "Private Office",
        capacity: "1-3",
        price_per_hour: 35.0,
        amenities: &["WiFi", "Coffee", "Printer"],
    },
    SampleRoom {
        name: "Conference Room",
        description: "A spacious meeting room for team gatherings and client presentations.",
        room_type: "Meeting Room",
        capacity: "6-10",
        price_per_hour: 75.0,
        amenities: &["WiFi", "AV Equipment", "Whiteboard"],
    },
    SampleRoom {
        name: "Workshop Area",
        description: "A versatile space for workshops, events, and large gatherings.",
        room_type: "Event Space",
        capacity: "Up to 30",
        price_per_hour: 150.0,
        amenities: &["WiFi", "AV Equipment", "Catering"],
    },
    SampleRoom {
        name: "Flex Desk",
        description: "A hot desk for individual work in a collaborative environment.",
        room_type: "Hot Desk",
        capacity: "1",
        price_per_hour: 15.0,
        amenities: &["WiFi", "Coffee", "Printer"],
    },
    SampleRoom {
        name: "Team Office",
        description: "A dedicated office space for medium-sized teams.",
        room_type: "Private Office",
        capacity: "4-8",
        price_per_hour: 60.0,
        amenities: &["WiFi", "Coffee", "Printer"],
    },
    SampleRoom {
        name: "Meeting Pod",
        description: "A small meeting room for quick discussions and interviews.",
        room_type: "Meeting Room",
        capacity: "2-4",
        price_per_hour: 40.0,
        amenities: &["WiFi", "Whiteboard", "Coffee"],
    },
];

/// What a seeding run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub admin_created: bool,
    pub rooms_created: usize,
}

fn sample_catalog() -> Vec<NewRoom> {
    SAMPLE_ROOMS
        .iter()
        .map(|room| NewRoom {
            name: room.name.to_string(),
            description: room.description.to_string(),
            room_type: room.room_type.to_string(),
            capacity: room.capacity.to_string(),
            price_per_hour: room.price_per_hour,
            amenities: room.amenities.iter().map(ToString::to_string).collect(),
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            status: ActiveStatus::Active,
        })
        .collect()
}

pub async fn seed_defaults(store: &Store, config: &Config) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if store
        .get_user_by_email(&config.seed.admin_email)
        .await?
        .is_none()
    {
        let password_hash = credentials::hash_password_async(
            config.seed.admin_password.clone(),
            config.security.clone(),
        )
        .await?;

        store
            .create_user(UserRecord {
                name: config.seed.admin_name.clone(),
                email: config.seed.admin_email.clone(),
                password_hash,
                role: UserRole::Admin,
                status: ActiveStatus::Active,
            })
            .await?;

        report.admin_created = true;
        info!("Seeded admin account {}", config.seed.admin_email);
    }

    if config.seed.sample_rooms && store.count_rooms(None).await? == 0 {
        report.rooms_created = store.create_rooms(&sample_catalog()).await?;
        info!("Seeded {} sample rooms", report.rooms_created);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.security.argon2_memory_cost_kib = 1024;
        config.security.argon2_time_cost = 1;
        config
    }

    #[test]
    fn sample_prices_are_positive() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.iter().all(|r| r.price_per_hour > 0.0));
    }

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let config = fast_config();

        let first = seed_defaults(&store, &config).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                admin_created: true,
                rooms_created: 6
            }
        );

        let second = seed_defaults(&store, &config).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let admin = store
            .get_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(store.count_rooms(None).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn sample_rooms_can_be_disabled() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let mut config = fast_config();
        config.seed.sample_rooms = false;

        let report = seed_defaults(&store, &config).await.unwrap();
        assert!(report.admin_created);
        assert_eq!(report.rooms_created, 0);
    }
}
