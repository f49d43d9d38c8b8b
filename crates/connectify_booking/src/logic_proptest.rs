#[cfg(test)]
mod tests {
    use crate::directory::StaticProfessionalDirectory;
    use crate::error::BookingError;
    use crate::logic::{BookingFilters, BookingResponse, BookingService, CreateBookingRequest};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use connectify_common::models::BookingStatus;
    use connectify_db::MemoryBookingRepository;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    // Intervals in minutes from one day after `now`
    fn intervals() -> impl Strategy<Value = Vec<(i64, i64, bool)>> {
        prop::collection::vec((0..600i64, 1..120i64, any::<bool>()), 1..25)
    }

    fn overlaps(a: &BookingResponse, b: &BookingResponse) -> bool {
        a.start_time < b.end_time && b.start_time < a.end_time
    }

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        // Accepted bookings never overlap, and every rejection had a reason
        #[test]
        fn test_active_bookings_never_overlap(intervals in intervals()) {
            let (accepted, rejected) = run(async {
                let service = BookingService::new(
                    MemoryBookingRepository::new(),
                    Arc::new(StaticProfessionalDirectory::new(["P1"])),
                );
                let base = now() + Duration::days(1);
                let mut rejected = Vec::new();

                for (offset, length, cancel) in intervals {
                    let request = CreateBookingRequest {
                        professional_id: "P1".to_string(),
                        client_id: "client".to_string(),
                        service_id: None,
                        start_time: base + Duration::minutes(offset),
                        end_time: base + Duration::minutes(offset + length),
                    };
                    match service.create_booking_at(request.clone(), now()).await {
                        Ok(booking) if cancel => {
                            service.cancel_booking(booking.id).await.unwrap();
                        }
                        Ok(_) => {}
                        Err(BookingError::TimeSlotUnavailable { .. }) => rejected.push(request),
                        Err(other) => panic!("unexpected error: {:?}", other),
                    }
                }

                let active = service
                    .list_professional_bookings("P1", BookingFilters::default())
                    .await
                    .unwrap()
                    .into_iter()
                    .filter(|b| b.status.is_active())
                    .collect::<Vec<_>>();
                (active, rejected)
            });

            for (i, a) in accepted.iter().enumerate() {
                prop_assert_eq!(a.status, BookingStatus::Pending);
                for b in accepted.iter().skip(i + 1) {
                    prop_assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
                }
            }

            // A rejected slot stays blocked by an active booking, since
            // bookings are only cancelled right after they are created
            for request in rejected {
                let blocked = accepted.iter().any(|b| {
                    request.start_time < b.end_time && b.start_time < request.end_time
                });
                prop_assert!(blocked, "{:?} was rejected without a conflict", request);
            }
        }

        #[test]
        fn test_past_starts_never_reach_the_store(minutes_ago in 0..10_000i64, length in 1..240i64) {
            let stored = run(async {
                let service = BookingService::new(
                    MemoryBookingRepository::new(),
                    Arc::new(StaticProfessionalDirectory::new(["P1"])),
                );
                let start = now() - Duration::minutes(minutes_ago);
                let request = CreateBookingRequest {
                    professional_id: "P1".to_string(),
                    client_id: "client".to_string(),
                    service_id: None,
                    start_time: start,
                    end_time: start + Duration::minutes(length),
                };
                let result = service.create_booking_at(request, now()).await;
                assert!(matches!(result, Err(BookingError::Validation(_))));
                service.repository().len().await
            });
            prop_assert_eq!(stored, 0);
        }
    }
}
