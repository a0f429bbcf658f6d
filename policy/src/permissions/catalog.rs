//! The closed catalog of member capabilities.
//!
//! Every permission has a stable wire name of the form `<category>:<action>`
//! shared with the web client and the back end.

use std::fmt;
use std::str::FromStr;

use super::set::PermissionSet;

/// A single capability a role may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Permission {
    // === Authentication ===
    /// Create a new account
    #[serde(rename = "auth:register")]
    Register,
    /// Sign in
    #[serde(rename = "auth:login")]
    Login,
    /// Sign out
    #[serde(rename = "auth:logout")]
    Logout,

    // === Profile ===
    /// View one's own profile
    #[serde(rename = "profile:view_own")]
    ViewOwnProfile,
    /// Edit one's own profile
    #[serde(rename = "profile:edit_own")]
    EditOwnProfile,
    /// View other members' profiles
    #[serde(rename = "profile:view_other")]
    ViewOtherProfiles,
    /// Edit other members' profiles
    #[serde(rename = "profile:edit_other")]
    EditOtherProfiles,

    // === Rooms ===
    /// Browse rooms
    #[serde(rename = "rooms:view")]
    ViewRooms,
    /// Add rooms
    #[serde(rename = "rooms:create")]
    CreateRooms,
    /// Change room details
    #[serde(rename = "rooms:edit")]
    EditRooms,
    /// Remove rooms
    #[serde(rename = "rooms:delete")]
    DeleteRooms,

    // === Bookings ===
    /// Reserve a room
    #[serde(rename = "bookings:create")]
    CreateBookings,
    /// View one's own bookings
    #[serde(rename = "bookings:view_own")]
    ViewOwnBookings,
    /// View every member's bookings
    #[serde(rename = "bookings:view_all")]
    ViewAllBookings,
    /// Edit one's own bookings
    #[serde(rename = "bookings:edit_own")]
    EditOwnBookings,
    /// Edit any booking
    #[serde(rename = "bookings:edit_all")]
    EditAllBookings,
    /// Cancel one's own bookings
    #[serde(rename = "bookings:cancel_own")]
    CancelOwnBookings,
    /// Cancel any booking
    #[serde(rename = "bookings:cancel_all")]
    CancelAllBookings,

    // === Visits ===
    /// Check in at the front desk
    #[serde(rename = "visits:check_in")]
    CheckIn,
    /// Check out at the front desk
    #[serde(rename = "visits:check_out")]
    CheckOut,
    /// View one's own visit history
    #[serde(rename = "visits:view_own")]
    ViewOwnVisits,
    /// View every member's visit history
    #[serde(rename = "visits:view_all")]
    ViewAllVisits,

    // === Donations ===
    /// Make a donation
    #[serde(rename = "donations:create")]
    CreateDonations,
    /// View one's own donations
    #[serde(rename = "donations:view_own")]
    ViewOwnDonations,
    /// View every member's donations
    #[serde(rename = "donations:view_all")]
    ViewAllDonations,

    // === Community ===
    /// Read the community feed
    #[serde(rename = "community:view_posts")]
    ViewPosts,
    /// Publish posts
    #[serde(rename = "community:create_posts")]
    CreatePosts,
    /// Edit one's own posts
    #[serde(rename = "community:edit_own_posts")]
    EditOwnPosts,
    /// Delete one's own posts
    #[serde(rename = "community:delete_own_posts")]
    DeleteOwnPosts,
    /// Delete any post
    #[serde(rename = "community:delete_all_posts")]
    DeleteAllPosts,

    // === Administration ===
    /// Open the admin panel
    #[serde(rename = "admin:access_panel")]
    AccessAdminPanel,
    /// View usage statistics
    #[serde(rename = "admin:view_stats")]
    ViewStatistics,
    /// Manage member accounts
    #[serde(rename = "admin:manage_users")]
    ManageUsers,
    /// Change system settings
    #[serde(rename = "admin:system_settings")]
    SystemSettings,
    /// Export data
    #[serde(rename = "admin:export_data")]
    ExportData,
}

/// Functional area a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Auth,
    Profile,
    Rooms,
    Bookings,
    Visits,
    Donations,
    Community,
    Admin,
}

impl PermissionCategory {
    /// Wire-name prefix of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Profile => "profile",
            Self::Rooms => "rooms",
            Self::Bookings => "bookings",
            Self::Visits => "visits",
            Self::Donations => "donations",
            Self::Community => "community",
            Self::Admin => "admin",
        }
    }
}

impl Permission {
    /// Returns the wire name, e.g. `bookings:view_own`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cw_policy::permissions::Permission;
    ///
    /// assert_eq!(Permission::CancelOwnBookings.as_str(), "bookings:cancel_own");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "auth:register",
            Self::Login => "auth:login",
            Self::Logout => "auth:logout",
            Self::ViewOwnProfile => "profile:view_own",
            Self::EditOwnProfile => "profile:edit_own",
            Self::ViewOtherProfiles => "profile:view_other",
            Self::EditOtherProfiles => "profile:edit_other",
            Self::ViewRooms => "rooms:view",
            Self::CreateRooms => "rooms:create",
            Self::EditRooms => "rooms:edit",
            Self::DeleteRooms => "rooms:delete",
            Self::CreateBookings => "bookings:create",
            Self::ViewOwnBookings => "bookings:view_own",
            Self::ViewAllBookings => "bookings:view_all",
            Self::EditOwnBookings => "bookings:edit_own",
            Self::EditAllBookings => "bookings:edit_all",
            Self::CancelOwnBookings => "bookings:cancel_own",
            Self::CancelAllBookings => "bookings:cancel_all",
            Self::CheckIn => "visits:check_in",
            Self::CheckOut => "visits:check_out",
            Self::ViewOwnVisits => "visits:view_own",
            Self::ViewAllVisits => "visits:view_all",
            Self::CreateDonations => "donations:create",
            Self::ViewOwnDonations => "donations:view_own",
            Self::ViewAllDonations => "donations:view_all",
            Self::ViewPosts => "community:view_posts",
            Self::CreatePosts => "community:create_posts",
            Self::EditOwnPosts => "community:edit_own_posts",
            Self::DeleteOwnPosts => "community:delete_own_posts",
            Self::DeleteAllPosts => "community:delete_all_posts",
            Self::AccessAdminPanel => "admin:access_panel",
            Self::ViewStatistics => "admin:view_stats",
            Self::ManageUsers => "admin:manage_users",
            Self::SystemSettings => "admin:system_settings",
            Self::ExportData => "admin:export_data",
        }
    }

    /// Returns the whole catalog in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Register,
            Self::Login,
            Self::Logout,
            Self::ViewOwnProfile,
            Self::EditOwnProfile,
            Self::ViewOtherProfiles,
            Self::EditOtherProfiles,
            Self::ViewRooms,
            Self::CreateRooms,
            Self::EditRooms,
            Self::DeleteRooms,
            Self::CreateBookings,
            Self::ViewOwnBookings,
            Self::ViewAllBookings,
            Self::EditOwnBookings,
            Self::EditAllBookings,
            Self::CancelOwnBookings,
            Self::CancelAllBookings,
            Self::CheckIn,
            Self::CheckOut,
            Self::ViewOwnVisits,
            Self::ViewAllVisits,
            Self::CreateDonations,
            Self::ViewOwnDonations,
            Self::ViewAllDonations,
            Self::ViewPosts,
            Self::CreatePosts,
            Self::EditOwnPosts,
            Self::DeleteOwnPosts,
            Self::DeleteAllPosts,
            Self::AccessAdminPanel,
            Self::ViewStatistics,
            Self::ManageUsers,
            Self::SystemSettings,
            Self::ExportData,
        ]
    }

    /// Returns the functional area of the permission.
    #[must_use]
    pub const fn category(&self) -> PermissionCategory {
        match self {
            Self::Register | Self::Login | Self::Logout => PermissionCategory::Auth,
            Self::ViewOwnProfile
            | Self::EditOwnProfile
            | Self::ViewOtherProfiles
            | Self::EditOtherProfiles => PermissionCategory::Profile,
            Self::ViewRooms | Self::CreateRooms | Self::EditRooms | Self::DeleteRooms => {
                PermissionCategory::Rooms
            }
            Self::CreateBookings
            | Self::ViewOwnBookings
            | Self::ViewAllBookings
            | Self::EditOwnBookings
            | Self::EditAllBookings
            | Self::CancelOwnBookings
            | Self::CancelAllBookings => PermissionCategory::Bookings,
            Self::CheckIn | Self::CheckOut | Self::ViewOwnVisits | Self::ViewAllVisits => {
                PermissionCategory::Visits
            }
            Self::CreateDonations | Self::ViewOwnDonations | Self::ViewAllDonations => {
                PermissionCategory::Donations
            }
            Self::ViewPosts
            | Self::CreatePosts
            | Self::EditOwnPosts
            | Self::DeleteOwnPosts
            | Self::DeleteAllPosts => PermissionCategory::Community,
            Self::AccessAdminPanel
            | Self::ViewStatistics
            | Self::ManageUsers
            | Self::SystemSettings
            | Self::ExportData => PermissionCategory::Admin,
        }
    }

    /// Returns a human-readable description of the permission.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Register => "Create a new account",
            Self::Login => "Sign in",
            Self::Logout => "Sign out",
            Self::ViewOwnProfile => "View own profile",
            Self::EditOwnProfile => "Edit own profile",
            Self::ViewOtherProfiles => "View other members' profiles",
            Self::EditOtherProfiles => "Edit other members' profiles",
            Self::ViewRooms => "Browse rooms",
            Self::CreateRooms => "Add rooms",
            Self::EditRooms => "Change room details",
            Self::DeleteRooms => "Remove rooms",
            Self::CreateBookings => "Reserve rooms",
            Self::ViewOwnBookings => "View own bookings",
            Self::ViewAllBookings => "View all bookings",
            Self::EditOwnBookings => "Edit own bookings",
            Self::EditAllBookings => "Edit any booking",
            Self::CancelOwnBookings => "Cancel own bookings",
            Self::CancelAllBookings => "Cancel any booking",
            Self::CheckIn => "Check in",
            Self::CheckOut => "Check out",
            Self::ViewOwnVisits => "View own visit history",
            Self::ViewAllVisits => "View all visits",
            Self::CreateDonations => "Make donations",
            Self::ViewOwnDonations => "View own donations",
            Self::ViewAllDonations => "View all donations",
            Self::ViewPosts => "Read the community feed",
            Self::CreatePosts => "Publish posts",
            Self::EditOwnPosts => "Edit own posts",
            Self::DeleteOwnPosts => "Delete own posts",
            Self::DeleteAllPosts => "Delete any post",
            Self::AccessAdminPanel => "Open the admin panel",
            Self::ViewStatistics => "View usage statistics",
            Self::ManageUsers => "Manage member accounts",
            Self::SystemSettings => "Change system settings",
            Self::ExportData => "Export data",
        }
    }

    /// Returns the single-bit set for this permission.
    #[must_use]
    pub const fn flag(self) -> PermissionSet {
        PermissionSet::from_bits_truncate(1 << self as u32)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a wire name from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_returns_all_variants() {
        assert_eq!(Permission::all().len(), 35);
    }

    #[test]
    fn test_wire_names_are_unique() {
        let names: HashSet<&str> = Permission::all().iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), Permission::all().len());
    }

    #[test]
    fn test_wire_name_prefix_matches_category() {
        for perm in Permission::all() {
            let (prefix, action) = perm
                .as_str()
                .split_once(':')
                .expect("wire name has a category prefix");
            assert_eq!(prefix, perm.category().as_str(), "{perm:?}");
            assert!(
                action.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "Action part of '{}' should be snake_case",
                perm
            );
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for perm in Permission::all() {
            assert_eq!(perm.as_str().parse::<Permission>(), Ok(*perm));
        }
    }

    #[test]
    fn test_parse_unknown_fails() {
        assert_eq!(
            "bookings:delete_all".parse::<Permission>(),
            Err(UnknownPermission("bookings:delete_all".into()))
        );
        assert!("".parse::<Permission>().is_err());
        assert!("AUTH:LOGIN".parse::<Permission>().is_err());
    }

    #[test]
    fn test_flags_are_distinct_single_bits() {
        let mut seen = PermissionSet::empty();
        for perm in Permission::all() {
            let flag = perm.flag();
            assert_eq!(flag.bits().count_ones(), 1, "{perm:?}");
            assert!(!seen.intersects(flag), "{perm:?} shares a bit");
            seen |= flag;
        }
        assert_eq!(seen, PermissionSet::all());
    }

    #[test]
    fn test_descriptions_are_not_empty() {
        for perm in Permission::all() {
            assert!(
                !perm.description().is_empty(),
                "Description for {:?} should not be empty",
                perm
            );
        }
    }

    // === Serde Tests ===

    #[test]
    fn test_serialize_permission() {
        let json = serde_json::to_string(&Permission::ViewStatistics).unwrap();
        assert_eq!(json, "\"admin:view_stats\"");
    }

    #[test]
    fn test_serde_matches_wire_name() {
        for perm in Permission::all() {
            let json = serde_json::to_string(perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.as_str()));
            let restored: Permission = serde_json::from_str(&json).unwrap();
            assert_eq!(*perm, restored);
        }
    }

    #[test]
    fn test_deserialize_unknown_fails() {
        assert!(serde_json::from_str::<Permission>("\"rooms:burn\"").is_err());
    }
}
