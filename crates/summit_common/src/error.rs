// --- File: crates/summit_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Summit errors.
///
/// Each crate keeps its own error enum and implements `From<ItsError>` for
/// `SummitError`. The message carried by a variant is what the client sees,
/// so server-side variants should be built with generic text; details belong
/// in the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummitError {
    /// Client input failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The caller presented a missing or wrong access key
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The resource already exists
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// The resource or feature is not available
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The database could not be reached
    #[error("Database unavailable: {0}")]
    UnavailableError(String),

    /// Any other server-side failure
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl SummitError {
    /// The client-facing message, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            SummitError::ValidationError(msg)
            | SummitError::AuthError(msg)
            | SummitError::ConflictError(msg)
            | SummitError::NotFoundError(msg)
            | SummitError::ConfigError(msg)
            | SummitError::UnavailableError(msg)
            | SummitError::InternalError(msg) => msg,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SummitError {
    fn status_code(&self) -> u16 {
        match self {
            SummitError::ValidationError(_) => 400,
            SummitError::AuthError(_) => 401,
            SummitError::ConflictError(_) => 409,
            SummitError::NotFoundError(_) => 404,
            SummitError::ConfigError(_) => 500,
            SummitError::UnavailableError(_) => 500,
            SummitError::InternalError(_) => 500,
        }
    }
}

/// Build a `NotFoundError` from any displayable message.
pub fn not_found<T: fmt::Display>(message: T) -> SummitError {
    SummitError::NotFoundError(message.to_string())
}
