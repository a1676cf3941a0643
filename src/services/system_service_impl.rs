//! `SeaORM` implementation of the `SystemService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::domain::{ActiveStatus, Principal, ReservationStatus};
use crate::services::seed::{self, SeedReport};
use crate::services::system_service::{
    DashboardStats, ReservationCounts, SystemError, SystemService,
};

pub struct SeaOrmSystemService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmSystemService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl SystemService for SeaOrmSystemService {
    async fn seed(&self) -> Result<SeedReport, SystemError> {
        let config = self.config.read().await.clone();
        Ok(seed::seed_defaults(&self.store, &config).await?)
    }

    async fn dashboard_stats(&self, caller: &Principal) -> Result<DashboardStats, SystemError> {
        caller.ensure_admin()?;

        let by_status = self.store.reservation_counts().await?;
        let count = |status| by_status.get(&status).copied().unwrap_or(0);
        let reservations = ReservationCounts {
            total: by_status.values().sum(),
            pending: count(ReservationStatus::Pending),
            confirmed: count(ReservationStatus::Confirmed),
            cancelled: count(ReservationStatus::Cancelled),
        };

        Ok(DashboardStats {
            total_rooms: self.store.count_rooms(None).await?,
            active_rooms: self.store.count_rooms(Some(ActiveStatus::Active)).await?,
            total_users: self.store.count_users(None).await?,
            active_users: self.store.count_users(Some(ActiveStatus::Active)).await?,
            reservations,
            revenue: self.store.confirmed_revenue().await?,
            currency: self.config.read().await.bookings.currency.clone(),
        })
    }
}
