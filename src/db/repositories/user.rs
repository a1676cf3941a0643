use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use tracing::info;

use crate::domain::{ActiveStatus, UserRole, new_record_id, now_timestamp};
use crate::entities::{prelude::*, users};
use crate::models::User;

/// Row data for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: ActiveStatus,
}

/// Column updates for an existing account. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<ActiveStatus>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            // Unknown stored values fall back to the least privileged option.
            role: model.role.parse().unwrap_or(UserRole::Client),
            status: model.status.parse().unwrap_or(ActiveStatus::Inactive),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, record: UserRecord) -> Result<User> {
        let now = now_timestamp();

        let active = users::ActiveModel {
            id: Set(new_record_id()),
            name: Set(record.name),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            role: Set(record.role.to_string()),
            status: Set(record.status.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        info!("Created user {} ({})", model.email, model.id);
        Ok(User::from(model))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = Users::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    /// Get user by email together with the stored password hash (login only)
    pub async fn get_with_password_by_email(&self, email: &str) -> Result<Option<(User, String)>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        let Some(user) = Users::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(now_timestamp());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;

        Ok(Some(User::from(model)))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Users::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self, status: Option<ActiveStatus>) -> Result<u64> {
        let mut query = Users::find();
        if let Some(status) = status {
            query = query.filter(users::Column::Status.eq(status.as_str()));
        }

        query
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Display names keyed by user id, for denormalizing reservation listings.
    pub async fn names_by_ids(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .filter(users::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.conn)
            .await
            .context("Failed to query user names")?;

        Ok(rows.into_iter().map(|u| (u.id, u.name)).collect())
    }
}
