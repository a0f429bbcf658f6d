//! Booking Rule Error Types

use chrono::TimeDelta;

use crate::permissions::AccessError;

/// A booking rule that rejected a request. The message is shown to the member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRuleError {
    #[error("Cannot book in the past")]
    InPast,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Maximum booking duration is {}", human_duration(.max))]
    TooLong { max: TimeDelta },

    #[error("Bookings are only possible between {opening_hour:02}:00 and {closing_hour:02}:00")]
    OutsideOpeningHours { opening_hour: u32, closing_hour: u32 },

    #[error("Cannot cancel a past booking")]
    AlreadyStarted,

    #[error("Cannot cancel less than {} before start", human_duration(.notice))]
    CancellationTooLate { notice: TimeDelta },

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("Cannot modify past bookings")]
    PastBookingImmutable,

    #[error("Maximum number of active bookings reached ({max})")]
    ActiveBookingLimit { max: usize },
}

/// Why a member could not cancel a booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancellationError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Rule(#[from] BookingRuleError),
}

/// Formats whole hours as "N hours" and anything else in minutes.
fn human_duration(duration: &TimeDelta) -> String {
    let minutes = duration.num_minutes();
    match (minutes / 60, minutes % 60) {
        (1, 0) => "1 hour".to_string(),
        (hours, 0) => format!("{hours} hours"),
        _ if minutes == 1 => "1 minute".to_string(),
        _ => format!("{minutes} minutes"),
    }
}
