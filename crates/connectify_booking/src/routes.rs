// --- File: crates/connectify_booking/src/routes.rs ---

use crate::handlers::{
    cancel_booking_handler, check_availability_handler, create_booking_handler,
    get_booking_handler, list_client_bookings_handler, list_professional_bookings_handler,
    update_booking_status_handler, BookingState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use connectify_db::BookingRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes<R>(state: Arc<BookingState<R>>) -> Router
where
    R: BookingRepository + 'static,
{
    Router::new()
        .route("/bookings", post(create_booking_handler::<R>))
        .route("/bookings/availability", get(check_availability_handler::<R>))
        .route("/bookings/{id}", get(get_booking_handler::<R>))
        .route("/bookings/{id}/status", put(update_booking_status_handler::<R>))
        .route("/bookings/{id}/cancel", post(cancel_booking_handler::<R>))
        .route(
            "/professional/bookings",
            get(list_professional_bookings_handler::<R>),
        )
        .route("/client/bookings", get(list_client_bookings_handler::<R>))
        .with_state(state)
}
