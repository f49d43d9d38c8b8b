//! Concurrent requests against one professional must never double-book.

use chrono::{DateTime, Duration, TimeZone, Utc};
use connectify_booking::{BookingError, BookingService, CreateBookingRequest, StaticProfessionalDirectory};
use connectify_common::models::BookingStatus;
use connectify_db::{
    BookingRepository, BookingStore, DbClient, MemoryBookingRepository, ProfessionalRepository,
    SqlBookingRepository, SqlProfessionalRepository,
};
use std::sync::Arc;
use tempfile::TempDir;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2097, 11, 20, 9, 0, 0).unwrap()
}

fn request(client: usize, offset_minutes: i64) -> CreateBookingRequest {
    let start_time = start() + Duration::minutes(offset_minutes);
    CreateBookingRequest {
        professional_id: "pro-1".to_string(),
        client_id: format!("client-{}", client),
        service_id: None,
        start_time,
        end_time: start_time + Duration::minutes(60),
    }
}

async fn sql_service() -> (TempDir, BookingService<BookingStore>) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("race.db").display());
    let db_client = DbClient::from_url(&url).await.unwrap();

    let store = BookingStore::from(SqlBookingRepository::new(db_client.clone()));
    let professionals = SqlProfessionalRepository::new(db_client);
    store.init_schema().await.unwrap();
    professionals.register_professional("pro-1").await.unwrap();

    (dir, BookingService::new(store, Arc::new(professionals)))
}

fn memory_service() -> BookingService<BookingStore> {
    BookingService::new(
        BookingStore::from(MemoryBookingRepository::new()),
        Arc::new(StaticProfessionalDirectory::new(["pro-1"])),
    )
}

// Fires `count` overlapping creates at once; returns how many succeeded
async fn race_creates(service: Arc<BookingService<BookingStore>>, count: usize) -> usize {
    let mut handles = Vec::with_capacity(count);
    for client in 0..count {
        let service = Arc::clone(&service);
        // Every request overlaps every other one
        let offset = (client % 30) as i64;
        handles.push(tokio::spawn(async move {
            service.create_booking(request(client, offset)).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(BookingError::TimeSlotUnavailable { .. }) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
    created
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_store_admits_one_of_many() {
    let service = Arc::new(memory_service());
    assert_eq!(race_creates(Arc::clone(&service), 32).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sql_store_admits_one_of_many() {
    let (_dir, service) = sql_service().await;
    let service = Arc::new(service);
    assert_eq!(race_creates(Arc::clone(&service), 16).await, 1);

    let stored = service
        .list_professional_bookings("pro-1", Default::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirm_and_cancel() {
    let (_dir, service) = sql_service().await;
    let service = Arc::new(service);
    let booking = service.create_booking(request(0, 0)).await.unwrap();

    let confirm = {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .update_booking_status(booking.id, BookingStatus::Confirmed)
                .await
        })
    };
    let cancel = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.cancel_booking(booking.id).await })
    };

    let confirmed = confirm.await.unwrap();
    let cancelled = cancel.await.unwrap();
    let last = service.get_booking(booking.id).await.unwrap();

    // Either order is legal; the stored status must reflect the last writer
    match (confirmed, cancelled) {
        (Ok(_), Ok(_)) => assert_eq!(last.status, BookingStatus::Cancelled),
        (Err(err), Ok(_)) => {
            assert!(matches!(err, BookingError::InvalidStatusTransition { .. }));
            assert_eq!(last.status, BookingStatus::Cancelled);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirms_apply_once() {
    let service = Arc::new(memory_service());
    let booking = service.create_booking(request(0, 0)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .update_booking_status(booking.id, BookingStatus::Confirmed)
                .await
        }));
    }

    let mut applied = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => applied += 1,
            Err(err) => assert!(matches!(
                err,
                BookingError::InvalidStatusTransition {
                    from: BookingStatus::Confirmed,
                    to: BookingStatus::Confirmed
                }
            )),
        }
    }
    assert_eq!(applied, 1);
}
