//! Repository for the professionals bookings may reference

use crate::error::DbError;
use std::future::Future;

pub trait ProfessionalRepository: Send + Sync {
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Register a professional. Registering an existing id is a no-op.
    fn register_professional(
        &self,
        professional_id: &str,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn professional_exists(
        &self,
        professional_id: &str,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// All registered ids, sorted.
    fn list_professionals(&self) -> impl Future<Output = Result<Vec<String>, DbError>> + Send;
}
