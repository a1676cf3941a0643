//! Domain service for system-level operations.
//!
//! Handles first-run seeding and the admin dashboard figures.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{AccessDenied, Principal};
use crate::services::seed::SeedReport;

/// Errors specific to system operations.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for SystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SystemError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCounts {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub cancelled: u64,
}

/// Figures shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: u64,
    pub active_rooms: u64,
    pub total_users: u64,
    pub active_users: u64,
    pub reservations: ReservationCounts,
    /// Sum of confirmed reservation prices.
    pub revenue: f64,
    pub currency: String,
}

/// Domain service trait for system operations.
#[async_trait::async_trait]
pub trait SystemService: Send + Sync {
    /// Creates the default admin and sample rooms when missing. Safe to call
    /// repeatedly.
    async fn seed(&self) -> Result<SeedReport, SystemError>;

    /// Aggregates catalog, account and booking counts. Admin only.
    async fn dashboard_stats(&self, caller: &Principal) -> Result<DashboardStats, SystemError>;
}
