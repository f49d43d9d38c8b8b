// --- File: crates/connectify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Workspace-wide error, the shape every HTTP handler finally answers with.
///
/// Domain crates keep their own error enums and convert into this one at the
/// handler boundary, which picks the status code.
#[derive(Error, Debug)]
pub enum ConnectifyError {
    /// Missing or unreadable configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The request itself is malformed or breaks a booking rule
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A collaborator such as the professional directory failed
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested time collides with an existing booking
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    /// A feature or dependency is switched off or not reachable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the HTTP status it is reported with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ConnectifyError {
    fn status_code(&self) -> u16 {
        match self {
            ConnectifyError::ValidationError(_) => 400,
            ConnectifyError::NotFoundError(_) => 404,
            ConnectifyError::ConflictError(_) => 409,
            ConnectifyError::ExternalServiceError { .. } => 502,
            ConnectifyError::ServiceUnavailable(_) => 503,
            ConnectifyError::ConfigError(_)
            | ConnectifyError::DatabaseError(_)
            | ConnectifyError::InternalError(_) => 500,
        }
    }
}

/// Attaches a message to a foreign error while turning it into an
/// [`ConnectifyError::InternalError`]. Used on the startup path.
pub trait Context<T, E> {
    fn context<C>(self, context: C) -> Result<T, ConnectifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Like [`Context::context`], building the message only on error.
    fn with_context<C, F>(self, f: F) -> Result<T, ConnectifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, ConnectifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| ConnectifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ConnectifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| ConnectifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> ConnectifyError {
    ConnectifyError::ConfigError(message.to_string())
}
