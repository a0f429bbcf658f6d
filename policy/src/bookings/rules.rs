//! Booking business rules.
//!
//! Every check takes the current instant as an argument; nothing here reads
//! the system clock.

use chrono::{DateTime, Timelike, Utc};
use cw_common::{Booking, BookingRequest, User};
use uuid::Uuid;

use super::error::{BookingRuleError, CancellationError};
use crate::config::BookingPolicy;
use crate::permissions::{require_booking_access, BookingAction};

/// The booking rules under a given [`BookingPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRules {
    policy: BookingPolicy,
}

impl BookingRules {
    #[must_use]
    pub const fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Validate a time window for a new or rescheduled booking.
    ///
    /// Checks run in order and the first failure is returned:
    /// 1. The start must not be in the past
    /// 2. The end must be after the start
    /// 3. The duration must not exceed the maximum
    /// 4. The start hour must not be before opening, the end hour not after closing
    ///
    /// Rule 4 compares hour fields only, so with the default policy a
    /// booking ending at 21:30 is accepted.
    pub fn validate_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), BookingRuleError> {
        if start < now {
            return Err(BookingRuleError::InPast);
        }

        if end <= start {
            return Err(BookingRuleError::EndNotAfterStart);
        }

        if end - start > self.policy.max_duration {
            return Err(BookingRuleError::TooLong {
                max: self.policy.max_duration,
            });
        }

        let start_hour = start.with_timezone(&self.policy.utc_offset).hour();
        let end_hour = end.with_timezone(&self.policy.utc_offset).hour();
        if start_hour < self.policy.opening_hour || end_hour > self.policy.closing_hour {
            return Err(BookingRuleError::OutsideOpeningHours {
                opening_hour: self.policy.opening_hour,
                closing_hour: self.policy.closing_hour,
            });
        }

        Ok(())
    }

    /// Validate the time window of a booking request.
    pub fn validate_booking_time(
        &self,
        request: &BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<(), BookingRuleError> {
        self.validate_window(request.start_time, request.end_time, now)
    }

    /// Check whether a booking starting at `booking.start_time` may still be
    /// cancelled.
    pub fn can_cancel_booking(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<(), BookingRuleError> {
        self.check_cancellation_window(booking.start_time, now)
    }

    /// Cancellation timing for a bare start instant.
    pub fn check_cancellation_window(
        &self,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), BookingRuleError> {
        if start < now {
            return Err(BookingRuleError::AlreadyStarted);
        }

        if start - now < self.policy.min_cancellation_notice {
            return Err(BookingRuleError::CancellationTooLate {
                notice: self.policy.min_cancellation_notice,
            });
        }

        Ok(())
    }

    /// Bookings that have started can no longer be edited.
    pub fn can_modify_booking(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<(), BookingRuleError> {
        if booking.start_time < now {
            return Err(BookingRuleError::PastBookingImmutable);
        }
        Ok(())
    }

    /// Check that `user_id` may take one more booking.
    ///
    /// Only confirmed bookings owned by `user_id` count towards the quota;
    /// `bookings` may contain other members' bookings.
    pub fn validate_booking_limits(
        &self,
        user_id: Uuid,
        bookings: &[Booking],
    ) -> Result<(), BookingRuleError> {
        let active = bookings
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active())
            .count();

        if active >= self.policy.max_active_bookings {
            return Err(BookingRuleError::ActiveBookingLimit {
                max: self.policy.max_active_bookings,
            });
        }
        Ok(())
    }

    /// Full cancellation check: access, status, then timing.
    pub fn authorize_cancellation(
        &self,
        user: Option<&User>,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<(), CancellationError> {
        require_booking_access(user, booking.user_id, BookingAction::Cancel)?;

        if !booking.is_active() {
            return Err(BookingRuleError::AlreadyCancelled.into());
        }

        self.can_cancel_booking(booking, now)?;
        Ok(())
    }
}

/// [`BookingRules::validate_booking_time`] under the default policy.
pub fn validate_booking_time(
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> Result<(), BookingRuleError> {
    BookingRules::default().validate_booking_time(request, now)
}

/// [`BookingRules::can_cancel_booking`] under the default policy.
pub fn can_cancel_booking(booking: &Booking, now: DateTime<Utc>) -> Result<(), BookingRuleError> {
    BookingRules::default().can_cancel_booking(booking, now)
}

/// [`BookingRules::can_modify_booking`] under the default policy.
pub fn can_modify_booking(booking: &Booking, now: DateTime<Utc>) -> Result<(), BookingRuleError> {
    BookingRules::default().can_modify_booking(booking, now)
}

/// [`BookingRules::validate_booking_limits`] under the default policy.
pub fn validate_booking_limits(user_id: Uuid, bookings: &[Booking]) -> Result<(), BookingRuleError> {
    BookingRules::default().validate_booking_limits(user_id, bookings)
}

/// [`BookingRules::authorize_cancellation`] under the default policy.
pub fn authorize_cancellation(
    user: Option<&User>,
    booking: &Booking,
    now: DateTime<Utc>,
) -> Result<(), CancellationError> {
    BookingRules::default().authorize_cancellation(user, booking, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::AccessError;
    use chrono::{FixedOffset, TimeDelta, TimeZone};
    use cw_common::BookingStatus;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        at(2024, 1, 1, 10, 0)
    }

    fn booking(owner: Uuid, start: DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: owner,
            room_id: Uuid::new_v4(),
            start_time: start,
            end_time: start + TimeDelta::hours(1),
            status: BookingStatus::Confirmed,
            purpose: "Standup".into(),
            created_at: at(2023, 12, 1, 12, 0),
        }
    }

    fn rules() -> BookingRules {
        BookingRules::default()
    }

    // === Time window ===

    #[test]
    fn test_start_in_past_wins_over_other_violations() {
        // Also inverted and outside opening hours
        let result = rules().validate_window(at(2024, 1, 1, 7, 0), at(2024, 1, 1, 6, 0), now());
        assert_eq!(result, Err(BookingRuleError::InPast));
    }

    #[test]
    fn test_start_equal_to_now_is_not_past() {
        assert_eq!(
            rules().validate_window(now(), at(2024, 1, 1, 11, 0), now()),
            Ok(())
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let start = at(2024, 1, 2, 10, 0);
        assert_eq!(
            rules().validate_window(start, start, now()),
            Err(BookingRuleError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_exactly_max_duration_accepted() {
        assert_eq!(
            rules().validate_window(at(2024, 1, 2, 10, 0), at(2024, 1, 2, 14, 0), now()),
            Ok(())
        );
    }

    #[test]
    fn test_one_minute_over_max_rejected() {
        assert_eq!(
            rules().validate_window(at(2024, 1, 2, 10, 0), at(2024, 1, 2, 14, 1), now()),
            Err(BookingRuleError::TooLong {
                max: TimeDelta::hours(4)
            })
        );
    }

    #[test]
    fn test_end_within_closing_hour_accepted() {
        // Hour field only: 21:30 still reads as hour 21
        assert_eq!(
            rules().validate_window(at(2024, 1, 2, 19, 0), at(2024, 1, 2, 21, 30), now()),
            Ok(())
        );
    }

    #[test]
    fn test_end_after_closing_hour_rejected() {
        assert!(matches!(
            rules().validate_window(at(2024, 1, 2, 19, 0), at(2024, 1, 2, 22, 0), now()),
            Err(BookingRuleError::OutsideOpeningHours { .. })
        ));
    }

    #[test]
    fn test_opening_hours_use_policy_offset() {
        let policy = BookingPolicy {
            utc_offset: FixedOffset::east_opt(3 * 3600).unwrap(),
            ..BookingPolicy::default()
        };
        let rules = BookingRules::new(policy);
        // 07:00 UTC is 10:00 at +03:00
        assert_eq!(
            rules.validate_window(at(2024, 1, 2, 7, 0), at(2024, 1, 2, 8, 0), now()),
            Ok(())
        );
        // 18:00 UTC ends at 21:00 local, 19:00 UTC ends at 22:00 local
        assert_eq!(
            rules.validate_window(at(2024, 1, 2, 17, 0), at(2024, 1, 2, 18, 0), now()),
            Ok(())
        );
        assert!(rules
            .validate_window(at(2024, 1, 2, 18, 0), at(2024, 1, 2, 19, 0), now())
            .is_err());
    }

    #[test]
    fn test_validate_booking_time_uses_request_window() {
        let request = BookingRequest {
            room_id: Uuid::new_v4(),
            start_time: at(2024, 1, 2, 10, 0),
            end_time: at(2024, 1, 2, 12, 0),
            purpose: String::new(),
        };
        assert_eq!(validate_booking_time(&request, now()), Ok(()));
    }

    // === Cancellation ===

    #[test]
    fn test_exactly_min_notice_allowed() {
        let b = booking(Uuid::new_v4(), at(2024, 1, 1, 12, 0));
        assert_eq!(can_cancel_booking(&b, now()), Ok(()));
    }

    #[test]
    fn test_start_now_is_too_late_not_past() {
        let b = booking(Uuid::new_v4(), now());
        assert_eq!(
            can_cancel_booking(&b, now()),
            Err(BookingRuleError::CancellationTooLate {
                notice: TimeDelta::hours(2)
            })
        );
    }

    #[test]
    fn test_custom_notice() {
        let rules = BookingRules::new(BookingPolicy {
            min_cancellation_notice: TimeDelta::minutes(30),
            ..BookingPolicy::default()
        });
        let b = booking(Uuid::new_v4(), at(2024, 1, 1, 10, 45));
        assert_eq!(rules.can_cancel_booking(&b, now()), Ok(()));
    }

    // === Modification ===

    #[test]
    fn test_modify_future_booking() {
        let b = booking(Uuid::new_v4(), at(2024, 1, 1, 10, 30));
        assert_eq!(can_modify_booking(&b, now()), Ok(()));
    }

    #[test]
    fn test_modify_started_booking_rejected() {
        let b = booking(Uuid::new_v4(), at(2024, 1, 1, 9, 30));
        assert_eq!(
            can_modify_booking(&b, now()),
            Err(BookingRuleError::PastBookingImmutable)
        );
    }

    // === Limits ===

    #[test]
    fn test_limits_count_only_confirmed_own_bookings() {
        let owner = Uuid::new_v4();
        let mut bookings = vec![
            booking(owner, at(2024, 1, 2, 10, 0)),
            booking(owner, at(2024, 1, 3, 10, 0)),
            booking(Uuid::new_v4(), at(2024, 1, 4, 10, 0)),
        ];
        let mut cancelled = booking(owner, at(2024, 1, 5, 10, 0));
        cancelled.status = BookingStatus::Cancelled;
        bookings.push(cancelled);

        assert_eq!(validate_booking_limits(owner, &bookings), Ok(()));

        bookings.push(booking(owner, at(2024, 1, 6, 10, 0)));
        assert_eq!(
            validate_booking_limits(owner, &bookings),
            Err(BookingRuleError::ActiveBookingLimit { max: 3 })
        );
    }

    #[test]
    fn test_limits_with_no_bookings() {
        assert_eq!(validate_booking_limits(Uuid::new_v4(), &[]), Ok(()));
    }

    // === Authorization ===

    #[test]
    fn test_owner_cancels_future_booking() {
        let user = User::new(Uuid::new_v4(), false);
        let b = booking(user.id, at(2024, 1, 2, 10, 0));
        assert_eq!(authorize_cancellation(Some(&user), &b, now()), Ok(()));
    }

    #[test]
    fn test_stranger_cannot_cancel() {
        let user = User::new(Uuid::new_v4(), false);
        let b = booking(Uuid::new_v4(), at(2024, 1, 2, 10, 0));
        assert_eq!(
            authorize_cancellation(Some(&user), &b, now()),
            Err(CancellationError::Access(AccessError::NotOwner))
        );
    }

    #[test]
    fn test_admin_still_bound_by_notice() {
        let admin = User::new(Uuid::new_v4(), true);
        let b = booking(Uuid::new_v4(), at(2024, 1, 1, 11, 0));
        assert!(matches!(
            authorize_cancellation(Some(&admin), &b, now()),
            Err(CancellationError::Rule(
                BookingRuleError::CancellationTooLate { .. }
            ))
        ));
    }

    #[test]
    fn test_cancelled_booking_cannot_be_cancelled_again() {
        let user = User::new(Uuid::new_v4(), false);
        let mut b = booking(user.id, at(2024, 1, 2, 10, 0));
        b.status = BookingStatus::Cancelled;
        assert_eq!(
            authorize_cancellation(Some(&user), &b, now()),
            Err(CancellationError::Rule(BookingRuleError::AlreadyCancelled))
        );
    }

    #[test]
    fn test_guest_cannot_cancel() {
        let b = booking(Uuid::new_v4(), at(2024, 1, 2, 10, 0));
        assert_eq!(
            authorize_cancellation(None, &b, now()),
            Err(CancellationError::Access(AccessError::Unauthenticated))
        );
    }
}
