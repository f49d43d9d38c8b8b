//! Error types for the database client and the booking stores

use connectify_common::models::BookingStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when working with the database client or a booking store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query, including rows that fail to decode
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// The professional is not registered with the store
    #[error("Professional {0} not found")]
    ProfessionalUnavailable(String),

    /// An active booking of the professional overlaps the requested slot
    #[error("Time slot is not available for professional {professional_id}")]
    TimeSlotUnavailable { professional_id: String },

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    /// The stored status does not allow the requested move
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}
