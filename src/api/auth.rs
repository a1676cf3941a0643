use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::ApiJson;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::Principal;
use crate::models::User;
use crate::services::{AuthError, LoginRequest, RegisterRequest};

/// Session key holding the signed-in user's id. Nothing else about the user
/// is kept in the session.
pub const SESSION_USER_KEY: &str = "user_id";

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::EmailTaken => Self::Conflict(err.to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// The signed-in user, re-read from the store on every request.
///
/// Rejects with 401 when there is no session, or when the account behind it
/// was deleted or deactivated since sign-in.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    #[must_use]
    pub fn principal(&self) -> Principal {
        self.0.principal()
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ApiError::internal(msg))?;

        let user_id = session
            .get::<String>(SESSION_USER_KEY)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to read session: {e}")))?
            .ok_or_else(ApiError::unauthorized)?;

        let Some(user) = state.auth_service().resolve_session(&user_id).await? else {
            let _ = session.flush().await;
            return Err(ApiError::unauthorized());
        };

        tracing::Span::current().record("user_id", user.id.as_str());
        Ok(Self(user))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth
/// Sign in with email and password and start a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.auth_service().login(payload).await?;

    // A fresh id on every sign-in so a pre-login session id is never promoted.
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, &user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

/// GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::success(user))
}

/// POST /auth/register
/// Self-service sign up; always creates an active client account
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth_service().register(payload).await?;
    tracing::info!(user_id = %user.id, "Account registered");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}
