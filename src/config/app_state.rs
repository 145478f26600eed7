use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{AppConfig, JwtConfig};
use crate::repositories::{PgTripRepository, PgUserRepository, TripRepository, UserRepository};
use crate::services::{TripService, UserService};

/// Application state shared across all handlers and services
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token signing configuration
    pub jwt: Arc<JwtConfig>,
    pub users: Arc<dyn UserRepository>,
    pub trips: Arc<dyn TripRepository>,
}

impl AppState {
    /// Create new AppState backed by a PostgreSQL pool
    pub fn new(db: PgPool, config: AppConfig, jwt: JwtConfig) -> Self {
        Self {
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            users: Arc::new(PgUserRepository::new(db.clone())),
            trips: Arc::new(PgTripRepository::new(db)),
        }
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone(), self.jwt.clone())
    }

    pub fn trip_service(&self) -> TripService {
        TripService::new(self.trips.clone(), self.users.clone())
    }
}
