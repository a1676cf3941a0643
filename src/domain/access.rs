//! Role and ownership checks applied at the entry of every mutating operation.
//!
//! A [`Principal`] is only ever built from a user record that was re-read from
//! the store for the current request, never from a client-supplied claim.

use super::UserRole;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: UserRole,
}

/// Reason an authenticated caller was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Unauthorized")]
    AdminRequired,

    #[error("You can only access your own reservations")]
    NotOwner,

    #[error("You cannot delete your own account")]
    SelfDeletion,
}

impl Principal {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    pub const fn ensure_admin(&self) -> Result<(), AccessDenied> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessDenied::AdminRequired)
        }
    }

    /// Admins may act on any user's records; everyone else only on their own.
    pub fn ensure_owner_or_admin(&self, owner_id: &str) -> Result<(), AccessDenied> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(AccessDenied::NotOwner)
        }
    }

    /// Admin-only account deletion, excluding the caller's own account.
    pub fn ensure_can_delete_user(&self, target_id: &str) -> Result<(), AccessDenied> {
        self.ensure_admin()?;
        if self.user_id == target_id {
            return Err(AccessDenied::SelfDeletion);
        }
        Ok(())
    }
}
