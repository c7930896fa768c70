//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techshop_core::{Email, UserId};

/// A registered shopper or admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, assigned as max(existing)+1.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address, also a login identifier.
    pub email: Email,
    /// Optional phone number, also accepted at login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Argon2 password hash. The field keeps the collection key `password`
    /// used by existing user records.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// Whether this account may log into the admin console.
    #[serde(default)]
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user; the repository assigns ID and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}
