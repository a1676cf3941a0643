use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, ReservationService, RoomService, SeaOrmAuthService, SeaOrmReservationService,
    SeaOrmRoomService, SeaOrmSystemService, SeaOrmUserService, SystemService, UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub room_service: Arc<dyn RoomService>,

    pub reservation_service: Arc<dyn ReservationService>,

    pub system_service: Arc<dyn SystemService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service around an already connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config = Arc::new(RwLock::new(config));

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()))
            as Arc<dyn AuthService>;
        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), config.clone()))
            as Arc<dyn UserService>;
        let room_service = Arc::new(SeaOrmRoomService::new(store.clone())) as Arc<dyn RoomService>;
        let reservation_service = Arc::new(SeaOrmReservationService::new(
            store.clone(),
            config.clone(),
        )) as Arc<dyn ReservationService>;
        let system_service = Arc::new(SeaOrmSystemService::new(store.clone(), config.clone()))
            as Arc<dyn SystemService>;

        Self {
            config,
            store,
            auth_service,
            user_service,
            room_service,
            reservation_service,
            system_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
