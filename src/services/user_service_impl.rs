//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{Config, SecurityConfig};
use crate::db::{Store, UserChanges, UserRecord, is_unique_violation};
use crate::domain::{AccessDenied, ActiveStatus, Principal, UserRole};
use crate::models::{User, UserPatch};
use crate::services::credentials;
use crate::services::user_service::{CreateUserRequest, UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn security(&self) -> SecurityConfig {
        self.config.read().await.security.clone()
    }

    fn check_password(password: &str, security: &SecurityConfig) -> Result<(), UserError> {
        if password.chars().count() < security.min_password_length {
            return Err(UserError::Validation(format!(
                "Password must be at least {} characters",
                security.min_password_length
            )));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<&str>) -> Result<(), UserError> {
        match self.store.get_user_by_email(email).await? {
            Some(existing) if Some(existing.id.as_str()) != owner => Err(UserError::EmailTaken),
            _ => Ok(()),
        }
    }

    async fn apply(&self, id: &str, changes: UserChanges) -> Result<User, UserError> {
        self.store
            .update_user(id, changes)
            .await
            .map_err(email_conflict)?
            .ok_or(UserError::NotFound)
    }
}

/// A duplicate email that slipped past `ensure_email_free` is still a conflict.
fn email_conflict(err: anyhow::Error) -> UserError {
    if is_unique_violation(&err) {
        UserError::EmailTaken
    } else {
        err.into()
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<String, UserError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| UserError::Validation(format!("{field} is required")))
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list(&self, caller: &Principal) -> Result<Vec<User>, UserError> {
        caller.ensure_admin()?;
        Ok(self.store.list_users().await?)
    }

    async fn get(&self, caller: &Principal, id: &str) -> Result<User, UserError> {
        if !caller.is_admin() && caller.user_id != id {
            return Err(AccessDenied::AdminRequired.into());
        }

        self.store.get_user(id).await?.ok_or(UserError::NotFound)
    }

    async fn create(
        &self,
        caller: &Principal,
        request: CreateUserRequest,
    ) -> Result<User, UserError> {
        caller.ensure_admin()?;

        let name = non_blank(request.name, "Name")?;
        let email = non_blank(request.email, "Email")?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| UserError::Validation("Password is required".to_string()))?;

        let security = self.security().await;
        Self::check_password(&password, &security)?;
        self.ensure_email_free(&email, None).await?;

        let password_hash = credentials::hash_password_async(password, security).await?;

        let user = self
            .store
            .create_user(UserRecord {
                name,
                email,
                password_hash,
                role: request.role.unwrap_or_default(),
                status: request.status.unwrap_or_default(),
            })
            .await
            .map_err(email_conflict)?;

        info!(admin = %caller.user_id, user_id = %user.id, "Account created");
        Ok(user)
    }

    async fn update(
        &self,
        caller: &Principal,
        id: &str,
        patch: UserPatch,
    ) -> Result<User, UserError> {
        if !caller.is_admin()
            && (caller.user_id != id || patch.role.is_some() || patch.status.is_some())
        {
            return Err(AccessDenied::AdminRequired.into());
        }

        if patch.is_empty() {
            return Err(UserError::Validation("No fields to update".to_string()));
        }

        let mut changes = UserChanges {
            role: patch.role,
            status: patch.status,
            ..Default::default()
        };

        if let Some(name) = patch.name {
            changes.name = Some(non_blank(Some(name), "Name")?);
        }

        if let Some(email) = patch.email {
            let email = non_blank(Some(email), "Email")?;
            self.ensure_email_free(&email, Some(id)).await?;
            changes.email = Some(email);
        }

        // An empty password in an edit form means "keep the current one".
        if let Some(password) = patch.password.filter(|p| !p.is_empty()) {
            let security = self.security().await;
            Self::check_password(&password, &security)?;
            changes.password_hash =
                Some(credentials::hash_password_async(password, security).await?);
        }

        self.apply(id, changes).await
    }

    async fn change_role(
        &self,
        caller: &Principal,
        id: &str,
        role: UserRole,
    ) -> Result<User, UserError> {
        caller.ensure_admin()?;

        let user = self
            .apply(
                id,
                UserChanges {
                    role: Some(role),
                    ..Default::default()
                },
            )
            .await?;

        info!(admin = %caller.user_id, user_id = %id, role = %role, "Role changed");
        Ok(user)
    }

    async fn change_status(
        &self,
        caller: &Principal,
        id: &str,
        status: ActiveStatus,
    ) -> Result<User, UserError> {
        caller.ensure_admin()?;

        let user = self
            .apply(
                id,
                UserChanges {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;

        info!(admin = %caller.user_id, user_id = %id, status = %status, "Status changed");
        Ok(user)
    }

    async fn delete(&self, caller: &Principal, id: &str) -> Result<(), UserError> {
        caller.ensure_can_delete_user(id)?;

        if !self.store.delete_user(id).await? {
            return Err(UserError::NotFound);
        }

        info!(admin = %caller.user_id, user_id = %id, "Account deleted");
        Ok(())
    }
}
