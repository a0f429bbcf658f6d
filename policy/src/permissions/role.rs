//! Roles and the role-to-permission matrix.

use std::fmt;
use std::str::FromStr;

use cw_common::User;

use super::set::PermissionSet;

/// Role derived from a user record. Never stored.
///
/// Roles are not ordered: an administrator holds everything a member holds,
/// but a guest holds `Register`, which neither of them has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No user is signed in.
    Guest,
    /// Signed-in member.
    User,
    /// Signed-in administrator.
    Admin,
}

impl Role {
    /// Returns the identifier used by the client (`guest`, `user`, `admin`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Returns the label shown next to a member's name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::User => "User",
            Self::Admin => "Administrator",
        }
    }

    /// Returns all roles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Guest, Self::User, Self::Admin]
    }

    /// Returns the permissions granted to this role.
    #[must_use]
    pub const fn permissions(self) -> PermissionSet {
        permissions_for(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Resolve the role of a (possibly absent) user.
///
/// Resolution order:
/// 1. No user is a guest
/// 2. The administrator flag makes an admin
/// 3. Everyone else is a member
#[must_use]
pub const fn resolve_role(user: Option<&User>) -> Role {
    match user {
        None => Role::Guest,
        Some(u) if u.is_admin => Role::Admin,
        Some(_) => Role::User,
    }
}

/// The permission matrix. Compiled in, so it can never change at runtime.
#[must_use]
pub const fn permissions_for(role: Role) -> PermissionSet {
    match role {
        Role::Guest => PermissionSet::GUEST,
        Role::User => PermissionSet::MEMBER,
        Role::Admin => PermissionSet::ADMIN,
    }
}
