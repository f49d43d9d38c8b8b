//! SQL implementation of the booking repository
//!
//! Writes are made atomic per engine:
//!
//! * SQLite has one writer per database file. Write transactions wait on the
//!   client's write gate, so the availability check and the insert (or the
//!   status read and the update) see no interleaved writer.
//! * PostgreSQL takes a transaction-scoped advisory lock keyed on the
//!   professional id before checking availability, and `SELECT ... FOR UPDATE`
//!   on the booking row before changing its status.

use crate::client::DbBackend;
use crate::error::DbError;
use crate::repositories::booking::BookingRepository;
use crate::repositories::schema;
use crate::DbClient;
use chrono::{DateTime, Utc};
use connectify_common::models::{Booking, BookingStatus, NewBooking, TimeSlot, TimeWindow};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const BOOKING_COLUMNS: &str =
    "id, professional_id, client_id, service_id, start_time, end_time, status, created_at, updated_at";

const ACTIVE_STATUSES: &str = "('pending', 'confirmed')";

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }

    async fn list_where(
        &self,
        column: &str,
        value: &str,
        window: TimeWindow,
        order: &str,
    ) -> Result<Vec<Booking>, DbError> {
        let mut query = format!(
            "SELECT {} FROM bookings WHERE {} = $1",
            BOOKING_COLUMNS, column
        );
        let mut bounds = Vec::new();
        if let Some(from) = window.from {
            bounds.push(to_micros(from));
            query.push_str(&format!(" AND end_time > ${}", bounds.len() + 1));
        }
        if let Some(to) = window.to {
            bounds.push(to_micros(to));
            query.push_str(&format!(" AND start_time < ${}", bounds.len() + 1));
        }
        query.push_str(" ORDER BY ");
        query.push_str(order);

        let mut statement = sqlx::query(&query).bind(value);
        for bound in bounds {
            statement = statement.bind(bound);
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings by {}: {}", column, e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(booking_from_row).collect()
    }
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        schema::ensure_schema(&self.db_client).await
    }

    async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        debug!(
            "Creating booking for professional {} from {} to {}",
            booking.professional_id,
            booking.slot.start(),
            booking.slot.end()
        );

        let booking = normalize(booking.into_booking(Utc::now()));

        let _gate = self.db_client.write_lock().await;
        let mut tx = self.db_client.begin().await?;

        if self.db_client.backend() == DbBackend::Postgres {
            sqlx::query(
                "SELECT 1 AS locked FROM (SELECT pg_advisory_xact_lock(hashtext($1))) AS professional_lock",
            )
            .bind(&booking.professional_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        }

        let professionals: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM professionals WHERE id = $1")
                .bind(&booking.professional_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;
        if professionals == 0 {
            return Err(DbError::ProfessionalUnavailable(booking.professional_id));
        }

        let conflicts: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM bookings \
             WHERE professional_id = $1 AND status IN {} \
             AND start_time < $2 AND end_time > $3",
            ACTIVE_STATUSES
        ))
        .bind(&booking.professional_id)
        .bind(to_micros(booking.end_time))
        .bind(to_micros(booking.start_time))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;
        if conflicts > 0 {
            warn!(
                "Slot {} - {} is taken for professional {}",
                booking.start_time, booking.end_time, booking.professional_id
            );
            return Err(DbError::TimeSlotUnavailable {
                professional_id: booking.professional_id,
            });
        }

        sqlx::query(&format!(
            "INSERT INTO bookings ({}) VALUES ($1, $2, $3, CAST($4 AS TEXT), $5, $6, $7, $8, $9)",
            BOOKING_COLUMNS
        ))
        .bind(booking.id.to_string())
        .bind(&booking.professional_id)
        .bind(&booking.client_id)
        .bind(booking.service_id.as_deref())
        .bind(to_micros(booking.start_time))
        .bind(to_micros(booking.end_time))
        .bind(booking.status.as_str())
        .bind(to_micros(booking.created_at))
        .bind(to_micros(booking.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert booking: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Booking {} created", booking.id);
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn list_by_professional(
        &self,
        professional_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        self.list_where(
            "professional_id",
            professional_id,
            window,
            "start_time ASC, created_at ASC, id ASC",
        )
        .await
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<Booking>, DbError> {
        self.list_where(
            "client_id",
            client_id,
            window,
            "start_time DESC, created_at ASC, id ASC",
        )
        .await
    }

    async fn is_time_slot_available(
        &self,
        professional_id: &str,
        slot: TimeSlot,
    ) -> Result<bool, DbError> {
        let conflicts: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM bookings \
             WHERE professional_id = $1 AND status IN {} \
             AND start_time < $2 AND end_time > $3",
            ACTIVE_STATUSES
        ))
        .bind(professional_id)
        .bind(to_micros(slot.end()))
        .bind(to_micros(slot.start()))
        .fetch_one(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(conflicts == 0)
    }

    async fn update_status(&self, id: Uuid, next: BookingStatus) -> Result<Booking, DbError> {
        debug!("Updating booking {} to {}", id, next);

        let select = match self.db_client.backend() {
            DbBackend::Postgres => format!(
                "SELECT {} FROM bookings WHERE id = $1 FOR UPDATE",
                BOOKING_COLUMNS
            ),
            DbBackend::Sqlite => format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS),
        };

        let _gate = self.db_client.write_lock().await;
        let mut tx = self.db_client.begin().await?;

        let row = sqlx::query(&select)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        let mut booking = match row {
            Some(row) => booking_from_row(&row)?,
            None => return Err(DbError::BookingNotFound(id)),
        };

        if !booking.status.can_transition_to(next) {
            return Err(DbError::InvalidStatusTransition {
                from: booking.status,
                to: next,
            });
        }

        let now = truncate_to_micros(Utc::now());
        sqlx::query("UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(next.as_str())
            .bind(to_micros(now))
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to update booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Booking {} moved from {} to {}", id, booking.status, next);
        booking.status = next;
        booking.updated_at = now;
        Ok(booking)
    }
}

fn to_micros(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

fn from_micros(micros: i64, column: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::<Utc>::from_timestamp_micros(micros)
        .ok_or_else(|| DbError::QueryError(format!("{} out of range: {}", column, micros)))
}

fn truncate_to_micros(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(to_micros(instant)).unwrap_or(instant)
}

/// Drops sub-microsecond precision so the returned record matches what a later read yields.
fn normalize(mut booking: Booking) -> Booking {
    booking.start_time = truncate_to_micros(booking.start_time);
    booking.end_time = truncate_to_micros(booking.end_time);
    booking.created_at = truncate_to_micros(booking.created_at);
    booking.updated_at = truncate_to_micros(booking.updated_at);
    booking
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;

    Ok(Booking {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::QueryError(format!("Invalid booking id {}: {}", id, e)))?,
        professional_id: row.try_get("professional_id")?,
        client_id: row.try_get("client_id")?,
        service_id: row.try_get("service_id")?,
        start_time: from_micros(row.try_get("start_time")?, "start_time")?,
        end_time: from_micros(row.try_get("end_time")?, "end_time")?,
        status: status
            .parse::<BookingStatus>()
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        created_at: from_micros(row.try_get("created_at")?, "created_at")?,
        updated_at: from_micros(row.try_get("updated_at")?, "updated_at")?,
    })
}
