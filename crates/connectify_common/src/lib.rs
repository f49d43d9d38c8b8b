// --- File: crates/connectify_common/src/lib.rs ---

// Declare modules within this crate
pub mod availability; // Slot availability predicate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // Error responses
pub mod logging; // Logging utilities
pub mod models; // Booking domain types

// Re-export the domain types most callers need
pub use models::{
    is_valid_transition, Booking, BookingStatus, InvalidTimeSlot, NewBooking, ParseStatusError,
    TimeSlot, TimeWindow,
};

pub use availability::{conflicting_bookings, is_slot_available};

// Re-export error types and utilities for easier access
pub use error::{config_error, ConnectifyError, Context, HttpStatusCode};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_env, init_with_level, log_result};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "booking")]
pub use features::is_booking_enabled;

// Shared booking domain, availability rules, error handling, HTTP and logging
// helpers used by every crate in the workspace.
