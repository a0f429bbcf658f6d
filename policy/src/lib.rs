//! Coworking Policy
//!
//! Role-based access control and booking rules for the coworking membership
//! app. Every check is a pure function of its inputs: no I/O, no clock, no
//! shared mutable state.

pub mod bookings;
pub mod config;
pub mod decision;
pub mod permissions;

pub use decision::Decision;
