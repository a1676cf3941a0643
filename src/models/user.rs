use serde::{Deserialize, Serialize};

use crate::domain::{ActiveStatus, Principal, UserRole};

/// A user account as exposed to callers. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: ActiveStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal::new(self.id.clone(), self.role)
    }
}

/// Fields an admin may change on an existing account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Plaintext; replaced by a fresh hash when present and non-empty.
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<ActiveStatus>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}
