//! Domain service for account administration.
//!
//! Admins manage every account. Other users may read their own account and
//! edit its name, email and password.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AccessDenied, ActiveStatus, Principal, UserRole};
use crate::models::{User, UserPatch};

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Email already in use")]
    EmailTaken,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Body of an admin account creation. Role and status default to an active
/// client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<ActiveStatus>,
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Lists every account. Admin only.
    async fn list(&self, caller: &Principal) -> Result<Vec<User>, UserError>;

    /// Gets one account. Admins may read any account, others only their own.
    async fn get(&self, caller: &Principal, id: &str) -> Result<User, UserError>;

    /// Creates an account with a hashed password. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] when name, email or password is
    /// missing and [`UserError::EmailTaken`] on a duplicate email.
    async fn create(&self, caller: &Principal, request: CreateUserRequest)
    -> Result<User, UserError>;

    /// Applies a patch. Role and status fields require an admin caller.
    async fn update(&self, caller: &Principal, id: &str, patch: UserPatch)
    -> Result<User, UserError>;

    async fn change_role(&self, caller: &Principal, id: &str, role: UserRole)
    -> Result<User, UserError>;

    async fn change_status(
        &self,
        caller: &Principal,
        id: &str,
        status: ActiveStatus,
    ) -> Result<User, UserError>;

    /// Deletes an account. Admin only, and never the caller's own account.
    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), UserError>;
}
