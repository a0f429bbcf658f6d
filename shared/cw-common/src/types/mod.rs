//! Entity types.

pub mod booking;
pub mod post;
pub mod user;

pub use booking::{Booking, BookingRequest, BookingStatus};
pub use post::Post;
pub use user::User;
