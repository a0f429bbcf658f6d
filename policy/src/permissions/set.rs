//! Permission sets using bitflags.
//!
//! Bit positions follow declaration order in [`Permission`], grouped as:
//! - Authentication (bits 0-2)
//! - Profile (bits 3-6)
//! - Rooms (bits 7-10)
//! - Bookings (bits 11-17)
//! - Visits (bits 18-21)
//! - Donations (bits 22-24)
//! - Community (bits 25-29)
//! - Administration (bits 30-34)

use bitflags::bitflags;

use super::catalog::Permission;

bitflags! {
    /// Immutable set of permissions packed into a 64-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct PermissionSet: u64 {
        // === Authentication (bits 0-2) ===
        /// Create a new account
        const REGISTER            = 1 << 0;
        /// Sign in
        const LOGIN               = 1 << 1;
        /// Sign out
        const LOGOUT              = 1 << 2;

        // === Profile (bits 3-6) ===
        /// View own profile
        const VIEW_OWN_PROFILE    = 1 << 3;
        /// Edit own profile
        const EDIT_OWN_PROFILE    = 1 << 4;
        /// View other members' profiles
        const VIEW_OTHER_PROFILES = 1 << 5;
        /// Edit other members' profiles
        const EDIT_OTHER_PROFILES = 1 << 6;

        // === Rooms (bits 7-10) ===
        /// Browse rooms
        const VIEW_ROOMS          = 1 << 7;
        /// Add rooms
        const CREATE_ROOMS        = 1 << 8;
        /// Change room details
        const EDIT_ROOMS          = 1 << 9;
        /// Remove rooms
        const DELETE_ROOMS        = 1 << 10;

        // === Bookings (bits 11-17) ===
        /// Reserve rooms
        const CREATE_BOOKINGS     = 1 << 11;
        /// View own bookings
        const VIEW_OWN_BOOKINGS   = 1 << 12;
        /// View all bookings
        const VIEW_ALL_BOOKINGS   = 1 << 13;
        /// Edit own bookings
        const EDIT_OWN_BOOKINGS   = 1 << 14;
        /// Edit any booking
        const EDIT_ALL_BOOKINGS   = 1 << 15;
        /// Cancel own bookings
        const CANCEL_OWN_BOOKINGS = 1 << 16;
        /// Cancel any booking
        const CANCEL_ALL_BOOKINGS = 1 << 17;

        // === Visits (bits 18-21) ===
        /// Check in
        const CHECK_IN            = 1 << 18;
        /// Check out
        const CHECK_OUT           = 1 << 19;
        /// View own visit history
        const VIEW_OWN_VISITS     = 1 << 20;
        /// View all visits
        const VIEW_ALL_VISITS     = 1 << 21;

        // === Donations (bits 22-24) ===
        /// Make donations
        const CREATE_DONATIONS    = 1 << 22;
        /// View own donations
        const VIEW_OWN_DONATIONS  = 1 << 23;
        /// View all donations
        const VIEW_ALL_DONATIONS  = 1 << 24;

        // === Community (bits 25-29) ===
        /// Read the community feed
        const VIEW_POSTS          = 1 << 25;
        /// Publish posts
        const CREATE_POSTS        = 1 << 26;
        /// Edit own posts
        const EDIT_OWN_POSTS      = 1 << 27;
        /// Delete own posts
        const DELETE_OWN_POSTS    = 1 << 28;
        /// Delete any post
        const DELETE_ALL_POSTS    = 1 << 29;

        // === Administration (bits 30-34) ===
        /// Open the admin panel
        const ACCESS_ADMIN_PANEL  = 1 << 30;
        /// View usage statistics
        const VIEW_STATISTICS     = 1 << 31;
        /// Manage member accounts
        const MANAGE_USERS        = 1 << 32;
        /// Change system settings
        const SYSTEM_SETTINGS     = 1 << 33;
        /// Export data
        const EXPORT_DATA         = 1 << 34;
    }
}

impl PermissionSet {
    // === Role Presets ===

    /// Permissions of an anonymous visitor: only account entry points.
    pub const GUEST: Self = Self::REGISTER.union(Self::LOGIN);

    /// Permissions of a signed-in member.
    ///
    /// Deliberately excludes `REGISTER`: members already have an account.
    pub const MEMBER: Self = Self::LOGIN
        .union(Self::LOGOUT)
        .union(Self::VIEW_OWN_PROFILE)
        .union(Self::EDIT_OWN_PROFILE)
        .union(Self::VIEW_ROOMS)
        .union(Self::CREATE_BOOKINGS)
        .union(Self::VIEW_OWN_BOOKINGS)
        .union(Self::EDIT_OWN_BOOKINGS)
        .union(Self::CANCEL_OWN_BOOKINGS)
        .union(Self::CHECK_IN)
        .union(Self::CHECK_OUT)
        .union(Self::VIEW_OWN_VISITS)
        .union(Self::CREATE_DONATIONS)
        .union(Self::VIEW_OWN_DONATIONS)
        .union(Self::VIEW_POSTS)
        .union(Self::CREATE_POSTS)
        .union(Self::EDIT_OWN_POSTS)
        .union(Self::DELETE_OWN_POSTS);

    /// Permissions added on top of [`Self::MEMBER`] for administrators.
    pub const ADMIN_EXTRA: Self = Self::VIEW_OTHER_PROFILES
        .union(Self::EDIT_OTHER_PROFILES)
        .union(Self::CREATE_ROOMS)
        .union(Self::EDIT_ROOMS)
        .union(Self::DELETE_ROOMS)
        .union(Self::VIEW_ALL_BOOKINGS)
        .union(Self::EDIT_ALL_BOOKINGS)
        .union(Self::CANCEL_ALL_BOOKINGS)
        .union(Self::VIEW_ALL_VISITS)
        .union(Self::VIEW_ALL_DONATIONS)
        .union(Self::DELETE_ALL_POSTS)
        .union(Self::ACCESS_ADMIN_PANEL)
        .union(Self::VIEW_STATISTICS)
        .union(Self::MANAGE_USERS)
        .union(Self::SYSTEM_SETTINGS)
        .union(Self::EXPORT_DATA);

    /// Permissions of an administrator.
    pub const ADMIN: Self = Self::MEMBER.union(Self::ADMIN_EXTRA);

    /// Room management capabilities, any one of which opens the management view.
    pub const ROOM_MANAGEMENT: Self = Self::CREATE_ROOMS
        .union(Self::EDIT_ROOMS)
        .union(Self::DELETE_ROOMS);

    // === Permission Checking ===

    /// Check if this set grants the given catalog permission.
    ///
    /// # Examples
    ///
    /// ```
    /// use cw_policy::permissions::{Permission, PermissionSet};
    ///
    /// assert!(PermissionSet::GUEST.has(Permission::Register));
    /// assert!(!PermissionSet::GUEST.has(Permission::Logout));
    /// ```
    #[must_use]
    pub const fn has(self, permission: Permission) -> bool {
        self.contains(permission.flag())
    }

    /// Check if this set grants at least one permission of `other`.
    #[must_use]
    pub const fn has_any(self, other: Self) -> bool {
        self.intersects(other)
    }

    /// Catalog permissions contained in this set, in catalog order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(move |p| self.has(*p))
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, perm| set | perm.flag())
    }
}
