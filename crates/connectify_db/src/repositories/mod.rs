//! Repository modules for database access
//!
//! Booking storage comes in two flavours behind [`BookingRepository`]: a SQL
//! store on top of [`crate::DbClient`] and an in-memory store. [`BookingStore`]
//! picks one at runtime.

pub mod booking;
pub mod booking_factory;
pub mod booking_memory;
pub mod booking_sql;
pub mod professional;
pub mod professional_sql;
pub mod schema;
pub mod store;

pub use booking::BookingRepository;
pub use booking_factory::BookingRepositoryFactory;
pub use booking_memory::MemoryBookingRepository;
pub use booking_sql::SqlBookingRepository;
pub use professional::ProfessionalRepository;
pub use professional_sql::SqlProfessionalRepository;
pub use store::BookingStore;
