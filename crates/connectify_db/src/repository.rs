//! Repository traits shared by the stores in this crate

/// A trait for database repository factories
///
/// Generic over the repository type and the handle it is built from,
/// usually a [`crate::DbClient`].
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
