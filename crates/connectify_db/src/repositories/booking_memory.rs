//! In-memory implementation of the booking repository
//!
//! Records live in a map behind an async `RwLock`. Creates hold the lock of
//! their professional for the availability check and the insert; status
//! updates hold the lock of their booking for the read and the write. The map
//! lock itself is only held for the individual read or write.

use crate::error::DbError;
use crate::locks::LockRegistry;
use crate::repositories::booking::{sort_ascending, sort_descending, BookingRepository};
use chrono::Utc;
use connectify_common::availability::is_slot_available;
use connectify_common::models::{Booking, BookingStatus, NewBooking, TimeSlot, TimeWindow};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
    professional_locks: LockRegistry<String>,
    booking_locks: LockRegistry<Uuid>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings, whatever their status.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }

    async fn list_matching<F>(&self, window: TimeWindow, matches: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        self.bookings
            .read()
            .await
            .values()
            .filter(|booking| matches(booking))
            .filter(|booking| window.intersects(booking.start_time, booking.end_time))
            .cloned()
            .collect()
    }
}

impl BookingRepository for MemoryBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        let _professional = self
            .professional_locks
            .acquire(booking.professional_id.clone())
            .await;

        let free = {
            let bookings = self.bookings.read().await;
            is_slot_available(&booking.professional_id, &booking.slot, bookings.values())
        };
        if !free {
            warn!(
                "Slot {} - {} is taken for professional {}",
                booking.slot.start(),
                booking.slot.end(),
                booking.professional_id
            );
            return Err(DbError::TimeSlotUnavailable {
                professional_id: booking.professional_id,
            });
        }

        let booking = booking.into_booking(Utc::now());
        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());

        info!("Booking {} created", booking.id);
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_by_professional(
        &self,
        professional_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        let mut bookings = self
            .list_matching(window, |b| b.professional_id == professional_id)
            .await;
        sort_ascending(&mut bookings);
        Ok(bookings)
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        let mut bookings = self
            .list_matching(window, |b| b.client_id == client_id)
            .await;
        sort_descending(&mut bookings);
        Ok(bookings)
    }

    async fn is_time_slot_available(
        &self,
        professional_id: &str,
        slot: TimeSlot,
    ) -> Result<bool, DbError> {
        let bookings = self.bookings.read().await;
        Ok(is_slot_available(professional_id, &slot, bookings.values()))
    }

    async fn update_status(&self, id: Uuid, next: BookingStatus) -> Result<Booking, DbError> {
        debug!("Updating booking {} to {}", id, next);
        let _booking_lock = self.booking_locks.acquire(id).await;

        let current = self
            .bookings
            .read()
            .await
            .get(&id)
            .map(|booking| booking.status)
            .ok_or(DbError::BookingNotFound(id))?;

        if !current.can_transition_to(next) {
            return Err(DbError::InvalidStatusTransition {
                from: current,
                to: next,
            });
        }

        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .get_mut(&id)
            .ok_or(DbError::BookingNotFound(id))?;
        booking.status = next;
        booking.updated_at = Utc::now();

        info!("Booking {} moved from {} to {}", id, current, next);
        Ok(booking.clone())
    }
}
