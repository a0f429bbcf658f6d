//! Guards for callers that propagate errors with `?`.
//!
//! Each guard wraps one decision function and explains a denial with an
//! [`AccessError`].

use cw_common::User;
use tracing::debug;
use uuid::Uuid;

use super::access::{
    check_booking_access, check_post_access, check_room_access, BookingAction, PostAction,
    RoomAction,
};
use super::catalog::Permission;
use super::error::AccessError;
use super::resolver::{has_permission, is_owner_or_admin};

/// Require that the user holds `permission`.
///
/// An absent user is reported as [`AccessError::Unauthenticated`] so the UI
/// can offer a login prompt.
pub fn require_permission(user: Option<&User>, permission: Permission) -> Result<(), AccessError> {
    if has_permission(user, permission) {
        return Ok(());
    }

    debug!(permission = %permission, signed_in = user.is_some(), "Permission denied");
    if user.is_none() {
        Err(AccessError::Unauthenticated)
    } else {
        Err(AccessError::MissingPermission(permission))
    }
}

/// Require access to a booking owned by `booking_owner_id`.
pub fn require_booking_access(
    user: Option<&User>,
    booking_owner_id: Uuid,
    action: BookingAction,
) -> Result<(), AccessError> {
    let Some(u) = user else {
        debug!(%action, "Booking access denied: not signed in");
        return Err(AccessError::Unauthenticated);
    };

    if check_booking_access(user, booking_owner_id, action) {
        Ok(())
    } else {
        debug!(user_id = %u.id, %booking_owner_id, %action, "Booking access denied");
        Err(AccessError::NotOwner)
    }
}

/// Require access to a post written by `post_author_id`.
pub fn require_post_access(
    user: Option<&User>,
    post_author_id: Uuid,
    action: PostAction,
) -> Result<(), AccessError> {
    let Some(u) = user else {
        debug!(%action, "Post access denied: not signed in");
        return Err(AccessError::Unauthenticated);
    };

    if check_post_access(user, post_author_id, action) {
        return Ok(());
    }

    debug!(user_id = %u.id, %post_author_id, %action, "Post access denied");
    match action {
        PostAction::View => Err(AccessError::MissingPermission(Permission::ViewPosts)),
        PostAction::Create => Err(AccessError::MissingPermission(Permission::CreatePosts)),
        PostAction::Edit | PostAction::Delete => Err(AccessError::NotOwner),
    }
}

/// Require a room action.
pub fn require_room_access(user: Option<&User>, action: RoomAction) -> Result<(), AccessError> {
    if user.is_none() {
        debug!(%action, "Room access denied: not signed in");
        return Err(AccessError::Unauthenticated);
    }

    if check_room_access(user, action) {
        Ok(())
    } else {
        debug!(%action, "Room access denied");
        Err(AccessError::MissingPermission(action.permission()))
    }
}

/// Require that the user owns the resource or is an administrator.
pub fn require_owner_or_admin(
    user: Option<&User>,
    resource_owner_id: Uuid,
) -> Result<(), AccessError> {
    if user.is_none() {
        return Err(AccessError::Unauthenticated);
    }

    if is_owner_or_admin(user, resource_owner_id) {
        Ok(())
    } else {
        debug!(%resource_owner_id, "Ownership check failed");
        Err(AccessError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> User {
        User::new(Uuid::new_v4(), false)
    }

    #[test]
    fn test_require_permission_granted() {
        let user = member();
        assert_eq!(
            require_permission(Some(&user), Permission::CreateBookings),
            Ok(())
        );
    }

    #[test]
    fn test_require_permission_guest_is_unauthenticated() {
        assert_eq!(
            require_permission(None, Permission::CreateBookings),
            Err(AccessError::Unauthenticated)
        );
        assert_eq!(
            require_permission(None, Permission::Login),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn test_require_permission_member_missing() {
        let user = member();
        assert_eq!(
            require_permission(Some(&user), Permission::ExportData),
            Err(AccessError::MissingPermission(Permission::ExportData))
        );
    }

    #[test]
    fn test_require_booking_access() {
        let user = member();
        assert_eq!(
            require_booking_access(Some(&user), user.id, BookingAction::Cancel),
            Ok(())
        );
        assert_eq!(
            require_booking_access(Some(&user), Uuid::new_v4(), BookingAction::Cancel),
            Err(AccessError::NotOwner)
        );
        assert_eq!(
            require_booking_access(None, user.id, BookingAction::View),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn test_require_post_access() {
        let user = member();
        assert_eq!(
            require_post_access(Some(&user), Uuid::new_v4(), PostAction::View),
            Ok(())
        );
        assert_eq!(
            require_post_access(Some(&user), Uuid::new_v4(), PostAction::Delete),
            Err(AccessError::NotOwner)
        );
    }

    #[test]
    fn test_require_room_access() {
        let user = member();
        assert_eq!(require_room_access(Some(&user), RoomAction::View), Ok(()));
        assert_eq!(
            require_room_access(Some(&user), RoomAction::Delete),
            Err(AccessError::MissingPermission(Permission::DeleteRooms))
        );
        assert_eq!(
            require_room_access(None, RoomAction::View),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn test_require_owner_or_admin() {
        let user = member();
        let admin = User::new(Uuid::new_v4(), true);
        assert_eq!(require_owner_or_admin(Some(&user), user.id), Ok(()));
        assert_eq!(require_owner_or_admin(Some(&admin), user.id), Ok(()));
        assert_eq!(
            require_owner_or_admin(Some(&user), admin.id),
            Err(AccessError::NotOwner)
        );
        assert_eq!(
            require_owner_or_admin(None, user.id),
            Err(AccessError::Unauthenticated)
        );
    }
}
