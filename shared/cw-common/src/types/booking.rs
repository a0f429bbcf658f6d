//! Room Booking Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// The room is reserved.
    #[default]
    Confirmed,
    /// The reservation was withdrawn.
    Cancelled,
}

/// Payload for reserving a room. No booking exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Room to reserve.
    pub room_id: Uuid,
    /// Requested start.
    pub start_time: DateTime<Utc>,
    /// Requested end.
    pub end_time: DateTime<Utc>,
    /// Free-text purpose shown to other members.
    #[serde(default)]
    pub purpose: String,
}

/// Stored room reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking ID.
    pub id: Uuid,
    /// Owner's user ID.
    pub user_id: Uuid,
    /// Reserved room.
    pub room_id: Uuid,
    /// Start of the reservation.
    pub start_time: DateTime<Utc>,
    /// End of the reservation.
    pub end_time: DateTime<Utc>,
    /// Current status.
    pub status: BookingStatus,
    /// Free-text purpose.
    #[serde(default)]
    pub purpose: String,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether the booking still holds the room.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, BookingStatus::Confirmed)
    }
}
