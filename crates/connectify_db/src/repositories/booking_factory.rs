//! Factories for the SQL repositories

use crate::repositories::booking_sql::SqlBookingRepository;
use crate::repositories::professional_sql::SqlProfessionalRepository;
use crate::{DbClient, RepositoryFactory};

/// Builds the SQL booking and professional repositories over one client.
#[derive(Debug, Clone, Default)]
pub struct BookingRepositoryFactory;

impl BookingRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlBookingRepository, DbClient> for BookingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlBookingRepository {
        SqlBookingRepository::new(db_client)
    }
}

impl RepositoryFactory<SqlProfessionalRepository, DbClient> for BookingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlProfessionalRepository {
        SqlProfessionalRepository::new(db_client)
    }
}
