//! Booking Policy Configuration
//!
//! The numeric limits of the booking rules. Defaults reproduce the house
//! rules; deployments may override them from environment variables.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use tracing::warn;

/// Limits applied by [`crate::bookings::BookingRules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    /// First bookable hour of the day (default: 9)
    pub opening_hour: u32,
    /// Last hour a booking may end in (default: 21)
    pub closing_hour: u32,
    /// Longest single booking (default: 4 hours)
    pub max_duration: TimeDelta,
    /// Shortest notice for a cancellation (default: 2 hours)
    pub min_cancellation_notice: TimeDelta,
    /// Confirmed bookings a member may hold at once (default: 3)
    pub max_active_bookings: usize,
    /// Offset the opening hours are expressed in (default: UTC)
    pub utc_offset: FixedOffset,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            opening_hour: 9,
            closing_hour: 21,
            max_duration: TimeDelta::hours(4),
            min_cancellation_notice: TimeDelta::hours(2),
            max_active_bookings: 3,
            utc_offset: Utc.fix(),
        }
    }
}

impl BookingPolicy {
    /// Load the policy from environment variables.
    ///
    /// Environment variables:
    /// - `BOOKING_OPENING_HOUR`: First bookable hour (default: 9)
    /// - `BOOKING_CLOSING_HOUR`: Last hour a booking may end in (default: 21)
    /// - `BOOKING_MAX_DURATION_MINUTES`: Longest booking (default: 240)
    /// - `BOOKING_MIN_CANCEL_NOTICE_MINUTES`: Cancellation notice (default: 120)
    /// - `BOOKING_MAX_ACTIVE`: Concurrent confirmed bookings (default: 3)
    /// - `BOOKING_UTC_OFFSET_MINUTES`: Local offset of the space (default: 0)
    ///
    /// Unparsable values keep the default. A policy that cannot be satisfied
    /// is an error.
    pub fn from_env() -> Result<Self> {
        let mut policy = Self::default();

        if let Some(hour) = parse_env("BOOKING_OPENING_HOUR") {
            policy.opening_hour = hour;
        }
        if let Some(hour) = parse_env("BOOKING_CLOSING_HOUR") {
            policy.closing_hour = hour;
        }
        if let Some(minutes) = parse_env("BOOKING_MAX_DURATION_MINUTES") {
            policy.max_duration = TimeDelta::try_minutes(minutes)
                .with_context(|| format!("BOOKING_MAX_DURATION_MINUTES out of range: {minutes}"))?;
        }
        if let Some(minutes) = parse_env("BOOKING_MIN_CANCEL_NOTICE_MINUTES") {
            policy.min_cancellation_notice = TimeDelta::try_minutes(minutes).with_context(|| {
                format!("BOOKING_MIN_CANCEL_NOTICE_MINUTES out of range: {minutes}")
            })?;
        }
        if let Some(max) = parse_env("BOOKING_MAX_ACTIVE") {
            policy.max_active_bookings = max;
        }
        if let Some(minutes) = parse_env::<i32>("BOOKING_UTC_OFFSET_MINUTES") {
            policy.utc_offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .with_context(|| format!("BOOKING_UTC_OFFSET_MINUTES out of range: {minutes}"))?;
        }

        policy.validate()?;
        Ok(policy)
    }

    /// Check that the limits describe a satisfiable policy.
    pub fn validate(&self) -> Result<()> {
        if self.closing_hour > 24 {
            bail!("closing hour must be at most 24, got {}", self.closing_hour);
        }
        if self.opening_hour >= self.closing_hour {
            bail!(
                "opening hour ({}) must be before closing hour ({})",
                self.opening_hour,
                self.closing_hour
            );
        }
        if self.max_duration <= TimeDelta::zero() {
            bail!("maximum booking duration must be positive");
        }
        if self.min_cancellation_notice < TimeDelta::zero() {
            bail!("cancellation notice cannot be negative");
        }
        if self.max_active_bookings == 0 {
            bail!("members must be allowed at least one active booking");
        }
        Ok(())
    }
}

/// Reads and parses an environment variable, warning on malformed values.
fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring malformed booking policy value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "BOOKING_OPENING_HOUR",
        "BOOKING_CLOSING_HOUR",
        "BOOKING_MAX_DURATION_MINUTES",
        "BOOKING_MIN_CANCEL_NOTICE_MINUTES",
        "BOOKING_MAX_ACTIVE",
        "BOOKING_UTC_OFFSET_MINUTES",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = BookingPolicy::default();
        assert_eq!(policy.opening_hour, 9);
        assert_eq!(policy.closing_hour, 21);
        assert_eq!(policy.max_duration, TimeDelta::hours(4));
        assert_eq!(policy.min_cancellation_notice, TimeDelta::hours(2));
        assert_eq!(policy.max_active_bookings, 3);
        assert_eq!(policy.utc_offset.local_minus_utc(), 0);
        assert!(policy.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_without_overrides() {
        clear_env();
        assert_eq!(BookingPolicy::from_env().unwrap(), BookingPolicy::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("BOOKING_OPENING_HOUR", "8");
        std::env::set_var("BOOKING_CLOSING_HOUR", " 22 ");
        std::env::set_var("BOOKING_MAX_DURATION_MINUTES", "90");
        std::env::set_var("BOOKING_MAX_ACTIVE", "5");
        std::env::set_var("BOOKING_UTC_OFFSET_MINUTES", "180");

        let policy = BookingPolicy::from_env().unwrap();
        assert_eq!(policy.opening_hour, 8);
        assert_eq!(policy.closing_hour, 22);
        assert_eq!(policy.max_duration, TimeDelta::minutes(90));
        assert_eq!(policy.max_active_bookings, 5);
        assert_eq!(policy.utc_offset.local_minus_utc(), 3 * 3600);
        assert_eq!(policy.min_cancellation_notice, TimeDelta::hours(2));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_malformed_values() {
        clear_env();
        std::env::set_var("BOOKING_MAX_ACTIVE", "many");
        let policy = BookingPolicy::from_env().unwrap();
        assert_eq!(policy.max_active_bookings, 3);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_inverted_hours() {
        clear_env();
        std::env::set_var("BOOKING_OPENING_HOUR", "22");
        assert!(BookingPolicy::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_offset_out_of_range() {
        clear_env();
        std::env::set_var("BOOKING_UTC_OFFSET_MINUTES", "1440");
        assert!(BookingPolicy::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let mut policy = BookingPolicy {
            closing_hour: 25,
            ..BookingPolicy::default()
        };
        assert!(policy.validate().is_err());

        policy = BookingPolicy {
            max_duration: TimeDelta::zero(),
            ..BookingPolicy::default()
        };
        assert!(policy.validate().is_err());

        policy = BookingPolicy {
            max_active_bookings: 0,
            ..BookingPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
