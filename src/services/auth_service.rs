//! Domain service for sign-in, self-registration and session resolution.

use serde::Deserialize;
use thiserror::Error;

use crate::models::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Email already in use")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if email or password is missing and
    /// [`AuthError::InvalidCredentials`] for an unknown email, a wrong
    /// password or an inactive account.
    async fn login(&self, request: LoginRequest) -> Result<User, AuthError>;

    /// Creates an active client account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is registered already.
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError>;

    /// Re-reads the user behind a session. Deleted and inactive accounts
    /// resolve to `None`.
    async fn resolve_session(&self, user_id: &str) -> Result<Option<User>, AuthError>;
}
