// --- File: crates/connectify_booking/src/lib.rs ---
// Declare modules within this crate
pub mod directory;
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

pub use directory::{ProfessionalDirectory, StaticProfessionalDirectory};
pub use error::BookingError;
pub use handlers::BookingState;
pub use logic::{
    AvailabilityResponse, BookingFilters, BookingResponse, BookingService, CreateBookingRequest,
};
pub use routes::routes;
