//! User Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member account as seen by the client.
///
/// The role is never stored here; it is derived from `is_admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the user is an administrator.
    pub is_admin: bool,
    /// Community karma points.
    pub karma: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an active member record with empty profile fields.
    #[must_use]
    pub fn new(id: Uuid, is_admin: bool) -> Self {
        Self {
            id,
            email: String::new(),
            full_name: String::new(),
            is_active: true,
            is_admin,
            karma: 0,
            created_at: DateTime::<Utc>::default(),
        }
    }
}
