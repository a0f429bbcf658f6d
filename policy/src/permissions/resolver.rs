//! Permission resolution logic.
//!
//! Answers "may this user do X" from the role matrix alone, without any
//! resource context.

use cw_common::User;
use uuid::Uuid;

use super::catalog::Permission;
use super::role::{permissions_for, resolve_role};
use super::set::PermissionSet;

/// Compute the permission set a (possibly absent) user holds.
///
/// An absent user holds nothing. The guest row of the matrix describes what
/// the sign-in screens offer; see [`permissions_for`].
#[must_use]
pub const fn compute_permissions(user: Option<&User>) -> PermissionSet {
    match user {
        Some(_) => permissions_for(resolve_role(user)),
        None => PermissionSet::empty(),
    }
}

/// Check whether a user holds a permission. Always `false` for `None`.
#[must_use]
pub const fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    compute_permissions(user).has(permission)
}

/// List a user's permissions in catalog order.
#[must_use]
pub fn user_permissions(user: Option<&User>) -> Vec<Permission> {
    compute_permissions(user).permissions().collect()
}

/// Whether the user is a signed-in administrator.
#[must_use]
pub const fn is_admin(user: Option<&User>) -> bool {
    matches!(user, Some(u) if u.is_admin)
}

/// Whether the user owns the resource or is an administrator.
///
/// Use for resources that have no dedicated checker.
#[must_use]
pub fn is_owner_or_admin(user: Option<&User>, resource_owner_id: Uuid) -> bool {
    let Some(u) = user else {
        return false;
    };
    u.id == resource_owner_id || is_admin(user)
}

/// Whether admin-only navigation should be rendered for the user.
#[must_use]
pub const fn can_see_admin_elements(user: Option<&User>) -> bool {
    has_permission(user, Permission::AccessAdminPanel)
}
