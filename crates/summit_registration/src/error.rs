// --- File: crates/summit_registration/src/error.rs ---
use summit_common::{HttpStatusCode, SummitError};
use thiserror::Error;

/// Outcome of a failed registration or listing.
///
/// The `String` payloads carry the underlying storage error for the logs.
/// They never reach the client: see [`RegistrationError::public_message`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Name and email are required.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("This email is already registered.")]
    AlreadyRegistered,

    #[error("Database configuration error: {0}")]
    Configuration(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Duplicate check failed: {0}")]
    VerificationFailed(String),

    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Reading registrations failed: {0}")]
    ReadFailed(String),
}

impl RegistrationError {
    /// Machine readable reason sent in the `error` field of the response.
    pub fn reason(&self) -> &'static str {
        match self {
            RegistrationError::MissingFields => "missing_fields",
            RegistrationError::InvalidEmail => "invalid_email",
            RegistrationError::AlreadyRegistered => "email_already_registered",
            RegistrationError::Configuration(_) => "configuration_error",
            RegistrationError::Connection(_) => "database_unavailable",
            RegistrationError::VerificationFailed(_) => "verification_failed",
            RegistrationError::InsertFailed(_) => "insert_failed",
            RegistrationError::ReadFailed(_) => "read_failed",
        }
    }

    /// Message safe to show to the client.
    ///
    /// Client errors are specific; server errors are generic.
    pub fn public_message(&self) -> String {
        match self {
            RegistrationError::MissingFields
            | RegistrationError::InvalidEmail
            | RegistrationError::AlreadyRegistered => self.to_string(),
            RegistrationError::Configuration(_) | RegistrationError::Connection(_) => {
                "Registration is temporarily unavailable. Please try again later.".to_string()
            }
            RegistrationError::VerificationFailed(_) | RegistrationError::InsertFailed(_) => {
                "We could not complete your registration. Please try again later.".to_string()
            }
            RegistrationError::ReadFailed(_) => "Could not read registrations.".to_string(),
        }
    }
}

impl HttpStatusCode for RegistrationError {
    fn status_code(&self) -> u16 {
        match self {
            RegistrationError::MissingFields | RegistrationError::InvalidEmail => 400,
            RegistrationError::AlreadyRegistered => 409,
            _ => 500,
        }
    }
}

impl From<RegistrationError> for SummitError {
    fn from(err: RegistrationError) -> Self {
        let message = err.public_message();
        match err {
            RegistrationError::MissingFields | RegistrationError::InvalidEmail => {
                SummitError::ValidationError(message)
            }
            RegistrationError::AlreadyRegistered => SummitError::ConflictError(message),
            RegistrationError::Configuration(_) => SummitError::ConfigError(message),
            RegistrationError::Connection(_) => SummitError::UnavailableError(message),
            RegistrationError::VerificationFailed(_)
            | RegistrationError::InsertFailed(_)
            | RegistrationError::ReadFailed(_) => SummitError::InternalError(message),
        }
    }
}
