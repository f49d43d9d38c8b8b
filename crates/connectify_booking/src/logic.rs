// --- File: crates/connectify_booking/src/logic.rs ---
use crate::directory::ProfessionalDirectory;
use crate::error::BookingError;
use chrono::{DateTime, Duration, Utc};
use connectify_common::models::{Booking, BookingStatus, NewBooking, TimeSlot, TimeWindow};
use connectify_db::BookingRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

// --- Data Structures ---

/// Request body for creating a booking.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "pro-1"))]
    pub professional_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "client-42"))]
    pub client_id: String,
    /// Offered service being booked
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "consultation-60"))]
    pub service_id: Option<String>,
    /// RFC 3339 instant, must lie in the future
    #[cfg_attr(feature = "openapi", schema(example = "2030-05-15T10:00:00Z"))]
    pub start_time: DateTime<Utc>,
    /// RFC 3339 instant, must be after `start_time`
    #[cfg_attr(feature = "openapi", schema(example = "2030-05-15T11:00:00Z"))]
    pub end_time: DateTime<Utc>,
}

/// The external view of a booking.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub id: Uuid,
    pub professional_id: String,
    pub client_id: String,
    pub service_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            professional_id: booking.professional_id,
            client_id: booking.client_id,
            service_id: booking.service_id,
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Optional filters shared by both listing operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilters {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

impl BookingFilters {
    fn window(&self) -> Result<TimeWindow, BookingError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from >= to {
                return Err(BookingError::validation("'from' must be before 'to'"));
            }
        }
        Ok(TimeWindow::new(self.from, self.to))
    }

    fn keep(&self, booking: &Booking) -> bool {
        self.status.map_or(true, |status| booking.status == status)
    }
}

/// Request body for a status change. The status is parsed by the service so
/// unknown values surface as validation errors.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateStatusRequest {
    #[cfg_attr(feature = "openapi", schema(example = "confirmed"))]
    pub status: String,
}

/// Query for `GET /professional/bookings`.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ProfessionalBookingsQuery {
    pub professional_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// One of pending, confirmed, cancelled, completed
    pub status: Option<String>,
}

/// Query for `GET /client/bookings`.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ClientBookingsQuery {
    pub client_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Query for `GET /bookings/availability`.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    pub professional_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilityResponse {
    pub professional_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub available: bool,
}

/// Parses an optional status filter; unknown names are validation errors.
pub fn parse_status_filter(status: Option<&str>) -> Result<Option<BookingStatus>, BookingError> {
    status
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<BookingStatus>())
        .transpose()
        .map_err(|e| BookingError::Validation(e.to_string()))
}

// --- Validation ---

/// Checks a create request against the clock and the configured limits.
///
/// Runs before the directory or the store is consulted.
pub fn validate_create_request(
    request: &CreateBookingRequest,
    now: DateTime<Utc>,
    max_duration: Option<Duration>,
) -> Result<TimeSlot, BookingError> {
    if request.professional_id.trim().is_empty() {
        return Err(BookingError::validation("professional_id is required"));
    }
    if request.client_id.trim().is_empty() {
        return Err(BookingError::validation("client_id is required"));
    }

    let slot = TimeSlot::new(request.start_time, request.end_time)
        .map_err(|_| BookingError::validation("end time must be after start time"))?;

    if slot.start() <= now {
        return Err(BookingError::validation("start time must be in the future"));
    }

    if let Some(max) = max_duration {
        if slot.duration() > max {
            return Err(BookingError::Validation(format!(
                "booking may not exceed {} minutes",
                max.num_minutes()
            )));
        }
    }

    Ok(slot)
}

// --- Service ---

/// The booking operations.
///
/// Generic over the store so the same service runs on SQL, in memory, or on
/// the runtime-selected [`connectify_db::BookingStore`].
pub struct BookingService<R> {
    repository: R,
    directory: Arc<dyn ProfessionalDirectory>,
    max_booking_duration: Option<Duration>,
}

impl<R> BookingService<R>
where
    R: BookingRepository,
{
    pub fn new(repository: R, directory: Arc<dyn ProfessionalDirectory>) -> Self {
        Self {
            repository,
            directory,
            max_booking_duration: None,
        }
    }

    /// Caps the length of a single booking.
    ///
    /// `None`, a non-positive value, or one too large to be a duration removes the cap.
    pub fn with_max_booking_minutes(mut self, minutes: Option<i64>) -> Self {
        let positive = minutes.filter(|m| *m > 0);
        self.max_booking_duration = positive.and_then(Duration::try_minutes);
        if self.max_booking_duration.is_none() {
            if let Some(m) = positive {
                warn!("Ignoring max_booking_minutes = {}: out of range", m);
            }
        }
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn ensure_professional(&self, professional_id: &str) -> Result<(), BookingError> {
        if !self.directory.professional_exists(professional_id).await? {
            warn!("Unknown professional {}", professional_id);
            return Err(BookingError::ProfessionalUnavailable(
                professional_id.to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a `pending` booking.
    ///
    /// Validation runs first, then the directory lookup, then the store's
    /// atomic availability check and insert.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingResponse, BookingError> {
        self.create_booking_at(request, Utc::now()).await
    }

    /// [`Self::create_booking`] against an explicit clock.
    pub async fn create_booking_at(
        &self,
        request: CreateBookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingResponse, BookingError> {
        debug!(
            "Create booking request for professional {} by client {}",
            request.professional_id, request.client_id
        );

        let slot = validate_create_request(&request, now, self.max_booking_duration)
            .inspect_err(|e| warn!("Rejected booking request: {}", e))?;

        self.ensure_professional(&request.professional_id).await?;

        let service_id = request.service_id.filter(|id| !id.trim().is_empty());
        let booking = self
            .repository
            .create(
                NewBooking::new(request.professional_id, request.client_id, slot)
                    .with_service_id(service_id),
            )
            .await
            .map_err(BookingError::from)
            .inspect_err(|e| warn!("Booking not created: {}", e))?;

        info!(
            "Booking {} created for professional {}",
            booking.id, booking.professional_id
        );
        Ok(booking.into())
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<BookingResponse, BookingError> {
        self.repository
            .get_by_id(id)
            .await?
            .map(BookingResponse::from)
            .ok_or(BookingError::BookingNotFound(id))
    }

    /// A professional's bookings, earliest first.
    pub async fn list_professional_bookings(
        &self,
        professional_id: &str,
        filters: BookingFilters,
    ) -> Result<Vec<BookingResponse>, BookingError> {
        if professional_id.trim().is_empty() {
            return Err(BookingError::validation("professional_id is required"));
        }
        let window = filters.window()?;

        let bookings = self
            .repository
            .list_by_professional(professional_id, window)
            .await?;

        Ok(bookings
            .into_iter()
            .filter(|booking| filters.keep(booking))
            .map(BookingResponse::from)
            .collect())
    }

    /// A client's bookings, latest first.
    pub async fn list_client_bookings(
        &self,
        client_id: &str,
        filters: BookingFilters,
    ) -> Result<Vec<BookingResponse>, BookingError> {
        if client_id.trim().is_empty() {
            return Err(BookingError::validation("client_id is required"));
        }
        let window = filters.window()?;

        let bookings = self.repository.list_by_client(client_id, window).await?;

        Ok(bookings
            .into_iter()
            .filter(|booking| filters.keep(booking))
            .map(BookingResponse::from)
            .collect())
    }

    pub async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<BookingResponse, BookingError> {
        debug!("Status change for booking {} to {}", id, status);

        let booking = self
            .repository
            .update_status(id, status)
            .await
            .map_err(BookingError::from)
            .inspect_err(|e| warn!("Status change rejected: {}", e))?;

        Ok(booking.into())
    }

    /// Shorthand for moving a booking to `cancelled`.
    ///
    /// Cancelling a booking that is already cancelled or completed fails with
    /// [`BookingError::InvalidStatusTransition`].
    pub async fn cancel_booking(&self, id: Uuid) -> Result<BookingResponse, BookingError> {
        self.update_booking_status(id, BookingStatus::Cancelled)
            .await
    }

    /// Whether the slot is free right now. The answer is advisory; only
    /// [`Self::create_booking`] reserves the slot.
    pub async fn check_availability(
        &self,
        professional_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<bool, BookingError> {
        if professional_id.trim().is_empty() {
            return Err(BookingError::validation("professional_id is required"));
        }
        let slot = TimeSlot::new(start_time, end_time)
            .map_err(|_| BookingError::validation("end time must be after start time"))?;

        self.ensure_professional(professional_id).await?;

        Ok(self
            .repository
            .is_time_slot_available(professional_id, slot)
            .await?)
    }
}
