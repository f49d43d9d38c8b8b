// File: crates/connectify_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityQuery, AvailabilityResponse, BookingResponse, ClientBookingsQuery,
    CreateBookingRequest, ProfessionalBookingsQuery, UpdateStatusRequest,
};
use connectify_common::models::BookingStatus;

#[utoipa::path(
    post,
    path = "/bookings",
    request_body(content = CreateBookingRequest, example = json!({
        "professional_id": "pro-1",
        "client_id": "client-42",
        "service_id": "consultation-60",
        "start_time": "2030-05-15T10:00:00Z",
        "end_time": "2030-05-15T11:00:00Z"
    })),
    responses(
        (status = 201, description = "Booking created in pending status", body = BookingResponse),
        (status = 400, description = "Invalid request (past start, end before start, blank ids)"),
        (status = 404, description = "Professional not available"),
        (status = 409, description = "Time slot already taken",
         example = json!({
             "error": {
                 "message": "Conflict: Time slot is not available for professional pro-1",
                 "code": 409
             }
         })
        )
    ),
    tag = "Bookings"
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    get,
    path = "/bookings/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Whether the slot is currently free", body = AvailabilityResponse),
        (status = 400, description = "End time not after start time"),
        (status = 404, description = "Professional not available")
    ),
    tag = "Bookings"
)]
fn doc_check_availability_handler() {}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking id (UUID)")),
    responses(
        (status = 200, description = "The booking", body = BookingResponse),
        (status = 404, description = "Booking not found")
    ),
    tag = "Bookings"
)]
fn doc_get_booking_handler() {}

#[utoipa::path(
    put,
    path = "/bookings/{id}/status",
    params(("id" = String, Path, description = "Booking id (UUID)")),
    request_body(content = UpdateStatusRequest, example = json!({ "status": "confirmed" })),
    responses(
        (status = 200, description = "Booking with its new status", body = BookingResponse),
        (status = 400, description = "Unknown status or transition not allowed"),
        (status = 404, description = "Booking not found")
    ),
    tag = "Bookings"
)]
fn doc_update_booking_status_handler() {}

#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking id (UUID)")),
    responses(
        (status = 200, description = "Cancelled booking", body = BookingResponse),
        (status = 400, description = "Booking already cancelled or completed"),
        (status = 404, description = "Booking not found")
    ),
    tag = "Bookings"
)]
fn doc_cancel_booking_handler() {}

#[utoipa::path(
    get,
    path = "/professional/bookings",
    params(ProfessionalBookingsQuery),
    responses(
        (status = 200, description = "Bookings by ascending start time", body = [BookingResponse]),
        (status = 400, description = "Invalid window or status filter")
    ),
    tag = "Bookings"
)]
fn doc_list_professional_bookings_handler() {}

#[utoipa::path(
    get,
    path = "/client/bookings",
    params(ClientBookingsQuery),
    responses(
        (status = 200, description = "Bookings by descending start time", body = [BookingResponse]),
        (status = 400, description = "Invalid window or status filter")
    ),
    tag = "Bookings"
)]
fn doc_list_client_bookings_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_booking_handler,
        doc_check_availability_handler,
        doc_get_booking_handler,
        doc_update_booking_status_handler,
        doc_cancel_booking_handler,
        doc_list_professional_bookings_handler,
        doc_list_client_bookings_handler
    ),
    components(
        schemas(
            AvailabilityResponse,
            BookingResponse,
            BookingStatus,
            CreateBookingRequest,
            UpdateStatusRequest
        )
    ),
    tags(
        (name = "Bookings", description = "Booking scheduling API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
