// File: crates/connectify_booking/src/handlers.rs
use crate::error::BookingError;
use crate::logic::{
    parse_status_filter, AvailabilityQuery, AvailabilityResponse, BookingFilters,
    BookingResponse, BookingService, ClientBookingsQuery, CreateBookingRequest,
    ProfessionalBookingsQuery, UpdateStatusRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use connectify_common::error::ConnectifyError;
use connectify_common::models::BookingStatus;
use connectify_config::AppConfig;
use connectify_db::BookingRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Shared state for the booking handlers.
pub struct BookingState<R> {
    pub config: Arc<AppConfig>,
    pub service: BookingService<R>,
}

impl<R> BookingState<R> {
    pub fn new(config: Arc<AppConfig>, service: BookingService<R>) -> Self {
        Self { config, service }
    }
}

type HandlerResult<T> = Result<T, ConnectifyError>;

fn ensure_enabled<R>(state: &BookingState<R>) -> HandlerResult<()> {
    if !state.config.use_booking {
        return Err(ConnectifyError::ServiceUnavailable(
            "Booking service is disabled.".to_string(),
        ));
    }
    Ok(())
}

fn parse_booking_id(raw: &str) -> HandlerResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| BookingError::Validation(format!("Invalid booking id: {}", raw)).into())
}

/// `POST /bookings`
pub async fn create_booking_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Json(request): Json<CreateBookingRequest>,
) -> HandlerResult<(StatusCode, Json<BookingResponse>)>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let booking = state.service.create_booking(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /bookings/{id}`
pub async fn get_booking_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<BookingResponse>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let id = parse_booking_id(&id)?;
    Ok(Json(state.service.get_booking(id).await?))
}

/// `PUT /bookings/{id}/status`
pub async fn update_booking_status_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> HandlerResult<Json<BookingResponse>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let id = parse_booking_id(&id)?;
    let status = request
        .status
        .parse::<BookingStatus>()
        .map_err(|e| BookingError::Validation(e.to_string()))?;

    let booking = state.service.update_booking_status(id, status).await?;
    info!("Booking {} is now {}", booking.id, booking.status);
    Ok(Json(booking))
}

/// `POST /bookings/{id}/cancel`
pub async fn cancel_booking_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<BookingResponse>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let id = parse_booking_id(&id)?;
    Ok(Json(state.service.cancel_booking(id).await?))
}

/// `GET /professional/bookings`
pub async fn list_professional_bookings_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Query(query): Query<ProfessionalBookingsQuery>,
) -> HandlerResult<Json<Vec<BookingResponse>>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let filters = BookingFilters {
        from: query.from,
        to: query.to,
        status: parse_status_filter(query.status.as_deref())?,
    };
    let bookings = state
        .service
        .list_professional_bookings(&query.professional_id, filters)
        .await?;
    Ok(Json(bookings))
}

/// `GET /client/bookings`
pub async fn list_client_bookings_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Query(query): Query<ClientBookingsQuery>,
) -> HandlerResult<Json<Vec<BookingResponse>>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let filters = BookingFilters {
        from: query.from,
        to: query.to,
        status: parse_status_filter(query.status.as_deref())?,
    };
    let bookings = state
        .service
        .list_client_bookings(&query.client_id, filters)
        .await?;
    Ok(Json(bookings))
}

/// `GET /bookings/availability`
pub async fn check_availability_handler<R>(
    State(state): State<Arc<BookingState<R>>>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<Json<AvailabilityResponse>>
where
    R: BookingRepository + 'static,
{
    ensure_enabled(&state)?;
    let available = state
        .service
        .check_availability(&query.professional_id, query.start_time, query.end_time)
        .await?;

    Ok(Json(AvailabilityResponse {
        professional_id: query.professional_id,
        start_time: query.start_time,
        end_time: query.end_time,
        available,
    }))
}
