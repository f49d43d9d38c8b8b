//! Booking persistence for Connectify
//!
//! A database client built on `sqlx::Any` (SQLite by default, PostgreSQL behind
//! the `postgres` feature) and the booking and professional repositories on top
//! of it, plus an in-memory booking store with the same guarantees.
//!
//! # Example
//!
//! ```rust,no_run
//! use connectify_db::{BookingRepository, DbClient, SqlBookingRepository};
//!
//! async fn setup() -> Result<SqlBookingRepository, connectify_db::DbError> {
//!     let db_client = DbClient::from_url("sqlite://data/bookings.db").await?;
//!     let repo = SqlBookingRepository::new(db_client);
//!     repo.init_schema().await?;
//!     Ok(repo)
//! }
//! ```

pub mod client;
pub mod error;
pub mod locks;
pub mod repositories;
pub mod repository;

pub use client::{DbBackend, DbClient, DbTransaction};
pub use error::DbError;
pub use locks::LockRegistry;
pub use repository::RepositoryFactory;

pub use repositories::{
    BookingRepository, BookingRepositoryFactory, BookingStore, MemoryBookingRepository,
    ProfessionalRepository, SqlBookingRepository, SqlProfessionalRepository,
};
