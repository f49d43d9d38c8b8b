//! Runtime choice between the SQL and the in-memory booking store

use crate::error::DbError;
use crate::repositories::booking::BookingRepository;
use crate::repositories::booking_memory::MemoryBookingRepository;
use crate::repositories::booking_sql::SqlBookingRepository;
use connectify_common::models::{Booking, BookingStatus, NewBooking, TimeSlot, TimeWindow};
use uuid::Uuid;

#[derive(Debug)]
pub enum BookingStore {
    Sql(SqlBookingRepository),
    Memory(MemoryBookingRepository),
}

impl BookingStore {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingStore::Sql(_) => "sql",
            BookingStore::Memory(_) => "memory",
        }
    }
}

impl From<SqlBookingRepository> for BookingStore {
    fn from(repo: SqlBookingRepository) -> Self {
        BookingStore::Sql(repo)
    }
}

impl From<MemoryBookingRepository> for BookingStore {
    fn from(repo: MemoryBookingRepository) -> Self {
        BookingStore::Memory(repo)
    }
}

impl BookingRepository for BookingStore {
    async fn init_schema(&self) -> Result<(), DbError> {
        match self {
            BookingStore::Sql(repo) => repo.init_schema().await,
            BookingStore::Memory(repo) => repo.init_schema().await,
        }
    }

    async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.create(booking).await,
            BookingStore::Memory(repo) => repo.create(booking).await,
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.get_by_id(id).await,
            BookingStore::Memory(repo) => repo.get_by_id(id).await,
        }
    }

    async fn list_by_professional(
        &self,
        professional_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.list_by_professional(professional_id, window).await,
            BookingStore::Memory(repo) => repo.list_by_professional(professional_id, window).await,
        }
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.list_by_client(client_id, window).await,
            BookingStore::Memory(repo) => repo.list_by_client(client_id, window).await,
        }
    }

    async fn is_time_slot_available(
        &self,
        professional_id: &str,
        slot: TimeSlot,
    ) -> Result<bool, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.is_time_slot_available(professional_id, slot).await,
            BookingStore::Memory(repo) => repo.is_time_slot_available(professional_id, slot).await,
        }
    }

    async fn update_status(&self, id: Uuid, next: BookingStatus) -> Result<Booking, DbError> {
        match self {
            BookingStore::Sql(repo) => repo.update_status(id, next).await,
            BookingStore::Memory(repo) => repo.update_status(id, next).await,
        }
    }
}
