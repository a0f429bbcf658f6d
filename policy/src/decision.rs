//! Serializable allow/deny outcome for UI surfaces and the CLI.

use std::fmt::Display;

use serde::Serialize;

/// Outcome of a check, with the reason to show when it is a denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Decision {
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

impl<E: Display> From<Result<(), E>> for Decision {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::allow(),
            Err(e) => Self::deny(e.to_string()),
        }
    }
}
