//! Resource-scoped access checks.
//!
//! Each checker combines ownership of the target with a matrix lookup.
//! All of them deny an absent user, whatever the matrix says about guests.

use std::fmt;
use std::str::FromStr;

use cw_common::{Booking, Post, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::Permission;
use super::error::AccessError;
use super::resolver::{compute_permissions, has_permission, is_admin};
use super::set::PermissionSet;

// ============================================================================
// Actions
// ============================================================================

/// Action on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    View,
    Edit,
    Cancel,
}

/// Action on a community post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostAction {
    View,
    Create,
    Edit,
    Delete,
}

/// Action on a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomAction {
    View,
    Create,
    Edit,
    Delete,
}

impl BookingAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Cancel => "cancel",
        }
    }
}

impl PostAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl RoomAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// The permission that gates this action.
    #[must_use]
    pub const fn permission(&self) -> Permission {
        match self {
            Self::View => Permission::ViewRooms,
            Self::Create => Permission::CreateRooms,
            Self::Edit => Permission::EditRooms,
            Self::Delete => Permission::DeleteRooms,
        }
    }
}

impl FromStr for BookingAction {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "cancel" => Ok(Self::Cancel),
            _ => Err(AccessError::UnknownAction(s.to_string())),
        }
    }
}

impl FromStr for PostAction {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(AccessError::UnknownAction(s.to_string())),
        }
    }
}

impl FromStr for RoomAction {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(AccessError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RoomAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Checkers
// ============================================================================

/// Check access to a booking owned by `booking_owner_id`.
///
/// Owners act through the `*Own*` permissions, everyone else needs the
/// matching `*All*` permission.
#[must_use]
pub fn check_booking_access(
    user: Option<&User>,
    booking_owner_id: Uuid,
    action: BookingAction,
) -> bool {
    let Some(u) = user else {
        return false;
    };
    let is_own = u.id == booking_owner_id;

    let (own, all) = match action {
        BookingAction::View => (Permission::ViewOwnBookings, Permission::ViewAllBookings),
        BookingAction::Edit => (Permission::EditOwnBookings, Permission::EditAllBookings),
        BookingAction::Cancel => (Permission::CancelOwnBookings, Permission::CancelAllBookings),
    };

    (is_own && has_permission(user, own)) || has_permission(user, all)
}

/// Check access to a post written by `post_author_id`.
///
/// Reading never depends on authorship. Administrators may edit any post
/// even though no "edit all posts" permission exists.
#[must_use]
pub fn check_post_access(user: Option<&User>, post_author_id: Uuid, action: PostAction) -> bool {
    let Some(u) = user else {
        return false;
    };
    let is_own = u.id == post_author_id;

    match action {
        PostAction::View => has_permission(user, Permission::ViewPosts),
        PostAction::Create => has_permission(user, Permission::CreatePosts),
        PostAction::Edit => {
            (is_own && has_permission(user, Permission::EditOwnPosts)) || is_admin(user)
        }
        PostAction::Delete => {
            (is_own && has_permission(user, Permission::DeleteOwnPosts))
                || has_permission(user, Permission::DeleteAllPosts)
        }
    }
}

/// Check access to rooms. Rooms have no owner.
#[must_use]
pub fn check_room_access(user: Option<&User>, action: RoomAction) -> bool {
    user.is_some() && has_permission(user, action.permission())
}

/// Whether the user may open the room management view at all.
#[must_use]
pub const fn can_manage_rooms(user: Option<&User>) -> bool {
    compute_permissions(user).has_any(PermissionSet::ROOM_MANAGEMENT)
}

// ============================================================================
// Requests
// ============================================================================

/// A self-describing access check, as submitted by collaborators over JSON.
///
/// ```json
/// {"resource": "booking", "owner_id": "…", "action": "cancel"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "lowercase")]
pub enum AccessRequest {
    Booking {
        owner_id: Uuid,
        action: BookingAction,
    },
    Post {
        author_id: Uuid,
        action: PostAction,
    },
    Room {
        action: RoomAction,
    },
}

impl AccessRequest {
    /// Check an action against a stored booking.
    #[must_use]
    pub const fn for_booking(booking: &Booking, action: BookingAction) -> Self {
        Self::Booking {
            owner_id: booking.user_id,
            action,
        }
    }

    /// Check an action against a stored post.
    #[must_use]
    pub const fn for_post(post: &Post, action: PostAction) -> Self {
        Self::Post {
            author_id: post.author_id,
            action,
        }
    }

    /// Build a request from loosely typed parts (query strings, CLI flags).
    ///
    /// Unknown resources or actions, and owned resources without an owner,
    /// are rejected so that callers deny them.
    pub fn parse(resource: &str, action: &str, owner_id: Option<Uuid>) -> Result<Self, AccessError> {
        match resource {
            "booking" => Ok(Self::Booking {
                owner_id: owner_id.ok_or(AccessError::MissingOwner("booking"))?,
                action: action.parse()?,
            }),
            "post" => Ok(Self::Post {
                author_id: owner_id.ok_or(AccessError::MissingOwner("post"))?,
                action: action.parse()?,
            }),
            "room" => Ok(Self::Room {
                action: action.parse()?,
            }),
            other => Err(AccessError::UnknownResource(other.to_string())),
        }
    }
}

/// Dispatch a request to the matching checker.
#[must_use]
pub fn check_access(user: Option<&User>, request: &AccessRequest) -> bool {
    match *request {
        AccessRequest::Booking { owner_id, action } => {
            check_booking_access(user, owner_id, action)
        }
        AccessRequest::Post { author_id, action } => check_post_access(user, author_id, action),
        AccessRequest::Room { action } => check_room_access(user, action),
    }
}
