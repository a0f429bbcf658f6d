//! Access Error Types

use super::catalog::Permission;

/// Why an access guard refused an action.
///
/// The messages are safe to show to the member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("You need to sign in first")]
    Unauthenticated,

    #[error("Permission '{0}' required")]
    MissingPermission(Permission),

    #[error("Not enough permissions to access this resource")]
    NotOwner,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("The {0} owner must be given")]
    MissingOwner(&'static str),
}
