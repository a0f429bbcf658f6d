//! Permission system types and utilities.
//!
//! Role-based model:
//! - Catalog: the closed set of capabilities
//! - Matrix: a compiled-in permission set per role
//! - Checkers: resource-scoped decisions combining ownership and the matrix

pub mod access;
pub mod catalog;
pub mod error;
pub mod guard;
pub mod resolver;
pub mod role;
pub mod set;

pub use access::{
    can_manage_rooms, check_access, check_booking_access, check_post_access, check_room_access,
    AccessRequest, BookingAction, PostAction, RoomAction,
};
pub use catalog::{Permission, PermissionCategory, UnknownPermission};
pub use error::AccessError;
pub use guard::{
    require_booking_access, require_owner_or_admin, require_permission, require_post_access,
    require_room_access,
};
pub use resolver::{
    can_see_admin_elements, compute_permissions, has_permission, is_admin, is_owner_or_admin,
    user_permissions,
};
pub use role::{permissions_for, resolve_role, Role, UnknownRole};
pub use set::PermissionSet;
