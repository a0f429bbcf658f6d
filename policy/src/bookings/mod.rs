//! Room booking rules.

pub mod error;
pub mod rules;

pub use error::{BookingRuleError, CancellationError};
pub use rules::{
    authorize_cancellation, can_cancel_booking, can_modify_booking, validate_booking_limits,
    validate_booking_time, BookingRules,
};
