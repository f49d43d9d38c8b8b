//! Repository for bookings
//!
//! The store is the only component that mutates booking records. Both writes
//! are atomic with respect to the rule they guard:
//!
//! * [`BookingRepository::create`] checks availability and inserts under a lock
//!   scoped to the professional, so two overlapping requests cannot both pass.
//! * [`BookingRepository::update_status`] reads the current status, checks the
//!   transition and writes under a lock scoped to the booking.

use crate::error::DbError;
use connectify_common::models::{Booking, BookingStatus, NewBooking, TimeSlot, TimeWindow};
use std::future::Future;
use uuid::Uuid;

pub trait BookingRepository: Send + Sync {
    /// Create the tables the store needs, if they don't already exist.
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Insert a booking if its slot is free.
    ///
    /// The record gets a fresh id, status `pending` and both timestamps set to
    /// the current time.
    ///
    /// # Errors
    ///
    /// * [`DbError::TimeSlotUnavailable`] when an active booking of the same
    ///   professional overlaps the slot
    /// * [`DbError::ProfessionalUnavailable`] when the store keeps a professional
    ///   table and the id is missing from it
    fn create(&self, booking: NewBooking) -> impl Future<Output = Result<Booking, DbError>> + Send;

    /// Fetch one booking; `Ok(None)` when the id is unknown.
    fn get_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Bookings of a professional intersecting `window`, by ascending start time.
    fn list_by_professional(
        &self,
        professional_id: &str,
        window: TimeWindow,
    ) -> impl Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Bookings of a client intersecting `window`, by descending start time.
    fn list_by_client(
        &self,
        client_id: &str,
        window: TimeWindow,
    ) -> impl Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// `true` when no active booking of the professional overlaps `slot`.
    ///
    /// Advisory only: the answer may be stale by the time a create runs.
    fn is_time_slot_available(
        &self,
        professional_id: &str,
        slot: TimeSlot,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Move a booking to `next`, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// * [`DbError::BookingNotFound`] when the id is unknown
    /// * [`DbError::InvalidStatusTransition`] when the current status does not allow `next`
    fn update_status(
        &self,
        id: Uuid,
        next: BookingStatus,
    ) -> impl Future<Output = Result<Booking, DbError>> + Send;
}

/// Professional listings: start ascending, ties by creation then id.
pub(crate) fn sort_ascending(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

/// Client listings: start descending, ties by creation then id.
pub(crate) fn sort_descending(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        b.start_time
            .cmp(&a.start_time)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}
