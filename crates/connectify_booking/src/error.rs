// --- File: crates/connectify_booking/src/error.rs ---
use axum::response::{IntoResponse, Response};
use connectify_common::error::{ConnectifyError, HttpStatusCode};
use connectify_common::models::BookingStatus;
use connectify_db::DbError;
use thiserror::Error;
use uuid::Uuid;

/// Outcomes of the booking operations.
///
/// Every variant except `Directory` and `Store` is a business outcome the
/// caller can act on. Store failures are passed through untouched.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Professional {0} is not available")]
    ProfessionalUnavailable(String),

    #[error("Time slot is not available for professional {professional_id}")]
    TimeSlotUnavailable { professional_id: String },

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The professional directory could not answer
    #[error("Professional directory error: {0}")]
    Directory(String),

    #[error(transparent)]
    Store(DbError),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }
}

impl From<DbError> for BookingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ProfessionalUnavailable(id) => BookingError::ProfessionalUnavailable(id),
            DbError::TimeSlotUnavailable { professional_id } => {
                BookingError::TimeSlotUnavailable { professional_id }
            }
            DbError::BookingNotFound(id) => BookingError::BookingNotFound(id),
            DbError::InvalidStatusTransition { from, to } => {
                BookingError::InvalidStatusTransition { from, to }
            }
            other => BookingError::Store(other),
        }
    }
}

impl From<BookingError> for ConnectifyError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(message) => ConnectifyError::ValidationError(message),
            err @ BookingError::InvalidStatusTransition { .. } => {
                ConnectifyError::ValidationError(err.to_string())
            }
            err @ (BookingError::ProfessionalUnavailable(_) | BookingError::BookingNotFound(_)) => {
                ConnectifyError::NotFoundError(err.to_string())
            }
            err @ BookingError::TimeSlotUnavailable { .. } => {
                ConnectifyError::ConflictError(err.to_string())
            }
            BookingError::Directory(message) => ConnectifyError::ExternalServiceError {
                service_name: "professional-directory".to_string(),
                message,
            },
            BookingError::Store(err) => ConnectifyError::DatabaseError(err.to_string()),
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::Validation(_) | BookingError::InvalidStatusTransition { .. } => 400,
            BookingError::ProfessionalUnavailable(_) | BookingError::BookingNotFound(_) => 404,
            BookingError::TimeSlotUnavailable { .. } => 409,
            BookingError::Directory(_) => 502,
            BookingError::Store(_) => 500,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        ConnectifyError::from(self).into_response()
    }
}
