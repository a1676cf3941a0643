//! System API endpoints: first-run seeding, dashboard figures and health.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState};
use crate::services::{DashboardStats, SeedReport, SystemError};

impl From<SystemError> for ApiError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::Forbidden(denied) => denied.into(),
            SystemError::Database(msg) => Self::DatabaseError(msg),
            SystemError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub report: SeedReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// `GET /api/init`
///
/// Creates the default admin account and the sample room catalog when they
/// are missing. Repeated calls change nothing.
pub async fn init(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<InitResponse>>, ApiError> {
    let report = state.system_service().seed().await?;

    Ok(Json(ApiResponse::success(InitResponse {
        message: "Database initialized with admin user and sample rooms",
        report,
    })))
}

/// `GET /api/admin/stats`
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state
        .system_service()
        .dashboard_stats(&user.principal())
        .await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// `GET /api/health`
///
/// Liveness plus a database round trip. Answers 503 when the database is
/// unreachable.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = state.store().ping().await.is_ok();

    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ApiResponse::success(body))).into_response()
}
