//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{Store, UserRecord, is_unique_violation};
use crate::domain::{ActiveStatus, UserRole};
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService, LoginRequest, RegisterRequest};
use crate::services::credentials;

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, AuthError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::Validation(message.to_string()))
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        let (Some(email), Some(password)) = (request.email, request.password) else {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        };
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let Some((user, password_hash)) = self.store.get_user_with_password(email.trim()).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !credentials::verify_password_async(password, password_hash).await {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.status.is_active() {
            warn!(user_id = %user.id, "Login refused for inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User signed in");
        Ok(user)
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let name = required(request.name, "Name is required")?;
        let email = required(request.email, "Email is required")?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AuthError::Validation("Password is required".to_string()))?;

        if request.confirm_password.as_deref() != Some(password.as_str()) {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        let security = self.config.read().await.security.clone();
        if password.chars().count() < security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                security.min_password_length
            )));
        }

        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = credentials::hash_password_async(password, security).await?;

        let user = self
            .store
            .create_user(UserRecord {
                name,
                email,
                password_hash,
                role: UserRole::Client,
                status: ActiveStatus::Active,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailTaken
                } else {
                    e.into()
                }
            })?;

        Ok(user)
    }

    async fn resolve_session(&self, user_id: &str) -> Result<Option<User>, AuthError> {
        let user = self.store.get_user(user_id).await?;
        Ok(user.filter(|u| u.status.is_active()))
    }
}
