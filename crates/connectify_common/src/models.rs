// --- File: crates/connectify_common/src/models.rs ---

// Booking domain types shared by the store and the service layer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle status of a booking.
///
/// The allowed edges live in [`BookingStatus::allowed_transitions`]; every
/// transition check in the workspace goes through that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Outgoing edges of the status graph.
    ///
    /// | From | To |
    /// |---|---|
    /// | pending | confirmed, cancelled |
    /// | confirmed | completed, cancelled |
    /// | cancelled | - |
    /// | completed | - |
    pub const fn allowed_transitions(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Cancelled | BookingStatus::Completed => &[],
        }
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Active bookings still hold their time slot.
    pub const fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Terminal statuses have no outgoing edges.
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// Checks a transition against the status table.
pub fn is_valid_transition(current: BookingStatus, next: BookingStatus) -> bool {
    current.can_transition_to(next)
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a booking status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown booking status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for BookingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Returned when a slot's end is not after its start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("End time {end} must be after start time {start}")]
pub struct InvalidTimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open interval `[start, end)` of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidTimeSlot> {
        if end <= start {
            return Err(InvalidTimeSlot { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Optional date window used by listing queries.
///
/// Both bounds select bookings intersecting `[from, to)`. A single bound leaves
/// the other side open. No bounds select everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether an interval `[start, end)` intersects the window.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let after_from = self.from.map_or(true, |from| end > from);
        let before_to = self.to.map_or(true, |to| start < to);
        after_from && before_to
    }
}

/// A reservation of a professional's time by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub professional_id: String,
    pub client_id: String,
    /// Offered service the time is booked for, when the caller names one
    #[serde(default)]
    pub service_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// The `[start_time, end_time)` interval of this booking.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            start: self.start_time,
            end: self.end_time,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// The caller-supplied part of a booking; the store assigns id, status and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub professional_id: String,
    pub client_id: String,
    pub service_id: Option<String>,
    pub slot: TimeSlot,
}

impl NewBooking {
    pub fn new(
        professional_id: impl Into<String>,
        client_id: impl Into<String>,
        slot: TimeSlot,
    ) -> Self {
        Self {
            professional_id: professional_id.into(),
            client_id: client_id.into(),
            service_id: None,
            slot,
        }
    }

    pub fn with_service_id(mut self, service_id: Option<String>) -> Self {
        self.service_id = service_id;
        self
    }

    /// Materialises the record with a fresh id, `pending` status and both
    /// timestamps set to `now`.
    pub fn into_booking(self, now: DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            professional_id: self.professional_id,
            client_id: self.client_id,
            service_id: self.service_id,
            start_time: self.slot.start(),
            end_time: self.slot.end(),
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
