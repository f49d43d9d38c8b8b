//! Availability checking for professional time slots.
//!
//! A slot is free when no *active* booking (pending or confirmed) of the same
//! professional overlaps it. Terminal bookings never block a slot. The SQL store
//! expresses the same predicate as
//! `status IN ('pending', 'confirmed') AND start_time < :end AND end_time > :start`.

use crate::models::{Booking, TimeSlot};

/// Returns the active bookings of `professional_id` that overlap `slot`.
pub fn conflicting_bookings<'a, I>(
    professional_id: &str,
    slot: &TimeSlot,
    bookings: I,
) -> impl Iterator<Item = &'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let slot = *slot;
    let professional_id = professional_id.to_owned();
    bookings.into_iter().filter(move |booking| {
        booking.professional_id == professional_id
            && booking.is_active()
            && booking.slot().overlaps(&slot)
    })
}

/// `true` when `slot` is free for `professional_id` given `bookings`.
pub fn is_slot_available<'a, I>(professional_id: &str, slot: &TimeSlot, bookings: I) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    conflicting_bookings(professional_id, slot, bookings)
        .next()
        .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, NewBooking};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 4, 0, 0, 0).unwrap()
    }

    fn booking(professional: &str, start_min: i64, end_min: i64, status: BookingStatus) -> Booking {
        let slot = TimeSlot::new(
            base() + Duration::minutes(start_min),
            base() + Duration::minutes(end_min),
        )
        .unwrap();
        let mut booking = NewBooking::new(professional, "client", slot).into_booking(base());
        booking.status = status;
        booking
    }

    fn slot(start_min: i64, end_min: i64) -> TimeSlot {
        TimeSlot::new(
            base() + Duration::minutes(start_min),
            base() + Duration::minutes(end_min),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_calendar_is_available() {
        assert!(is_slot_available("p1", &slot(600, 660), []));
    }

    #[test]
    fn test_overlapping_active_booking_blocks() {
        let existing = vec![booking("p1", 600, 660, BookingStatus::Pending)];
        assert!(!is_slot_available("p1", &slot(630, 690), &existing));

        let existing = vec![booking("p1", 600, 660, BookingStatus::Confirmed)];
        assert!(!is_slot_available("p1", &slot(630, 690), &existing));
    }

    #[test]
    fn test_touching_endpoints_do_not_block() {
        let existing = vec![booking("p1", 600, 660, BookingStatus::Pending)];
        assert!(is_slot_available("p1", &slot(660, 720), &existing));
        assert!(is_slot_available("p1", &slot(540, 600), &existing));
    }

    #[test]
    fn test_terminal_bookings_never_block() {
        let existing = vec![
            booking("p1", 600, 660, BookingStatus::Cancelled),
            booking("p1", 600, 660, BookingStatus::Completed),
        ];
        assert!(is_slot_available("p1", &slot(600, 660), &existing));
    }

    #[test]
    fn test_other_professionals_do_not_block() {
        let existing = vec![booking("p2", 600, 660, BookingStatus::Confirmed)];
        assert!(is_slot_available("p1", &slot(600, 660), &existing));
    }

    #[test]
    fn test_conflicting_bookings_lists_only_blockers() {
        let existing = vec![
            booking("p1", 600, 660, BookingStatus::Pending),
            booking("p1", 660, 720, BookingStatus::Confirmed),
            booking("p1", 620, 640, BookingStatus::Cancelled),
        ];
        let conflicts: Vec<_> = conflicting_bookings("p1", &slot(630, 700), &existing).collect();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|b| b.is_active()));
    }

    proptest! {
        // The checker agrees with the half-open overlap definition.
        #[test]
        fn prop_available_iff_no_active_overlap(
            existing_start in 0..1000i64,
            existing_len in 1..300i64,
            start in 0..1000i64,
            len in 1..300i64,
            active in any::<bool>(),
        ) {
            let status = if active { BookingStatus::Confirmed } else { BookingStatus::Cancelled };
            let existing = vec![booking("p1", existing_start, existing_start + existing_len, status)];
            let overlap = start < existing_start + existing_len && existing_start < start + len;

            let available = is_slot_available("p1", &slot(start, start + len), &existing);
            prop_assert_eq!(available, !(active && overlap));
        }
    }
}
