// --- File: crates/summit_registration/src/service.rs ---
use crate::error::RegistrationError;
use crate::models::{NewRegistration, Registration};
use crate::store::{RegistrationSession, RegistrationStore};
use summit_db::DbError;
use tracing::{debug, error, info, warn};

/// Registration intake
///
/// Validates input, then checks for a duplicate and inserts through one
/// storage session. The session, and with it the connection, is released
/// on every path when it goes out of scope.
#[derive(Debug, Clone)]
pub struct RegistrationService<S> {
    store: S,
}

fn open_error(err: DbError) -> RegistrationError {
    if err.is_configuration() {
        error!("Database is not configured: {}", err);
        RegistrationError::Configuration(err.to_string())
    } else {
        error!("Database is unreachable: {}", err);
        RegistrationError::Connection(err.to_string())
    }
}

impl<S: RegistrationStore> RegistrationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register an attendee.
    ///
    /// # Errors
    ///
    /// * `MissingFields`/`InvalidEmail` before any storage access
    /// * `AlreadyRegistered` when the email exists, either found by the
    ///   pre-check or rejected by the unique constraint
    /// * `Configuration`/`Connection` when no session can be opened
    /// * `VerificationFailed`/`InsertFailed` for other storage errors
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Registration, RegistrationError> {
        let registration = NewRegistration::validate(name, email, message)?;

        let mut session = self.store.open().await.map_err(open_error)?;

        session.ensure_schema().await.map_err(|e| {
            error!("Could not prepare the registrations table: {}", e);
            RegistrationError::Connection(e.to_string())
        })?;

        match session.find_by_email(registration.email()).await {
            Ok(Some(existing)) => {
                debug!("Email already registered as {}", existing.id);
                return Err(RegistrationError::AlreadyRegistered);
            }
            Ok(None) => {}
            Err(e) => {
                error!("Duplicate check failed: {}", e);
                return Err(RegistrationError::VerificationFailed(e.to_string()));
            }
        }

        match session.insert(&registration).await {
            Ok(stored) => {
                info!("Registration {} created", stored.id);
                Ok(stored)
            }
            // Lost a race with a concurrent request for the same email
            Err(e) if e.is_unique_violation() => {
                warn!("Insert rejected by the unique constraint: {}", e);
                Err(RegistrationError::AlreadyRegistered)
            }
            Err(e) => {
                error!("Insert failed: {}", e);
                Err(RegistrationError::InsertFailed(e.to_string()))
            }
        }
    }

    /// All registrations, newest first.
    pub async fn list(&self) -> Result<Vec<Registration>, RegistrationError> {
        let mut session = self.store.open().await.map_err(open_error)?;
        session
            .ensure_schema()
            .await
            .map_err(|e| RegistrationError::Connection(e.to_string()))?;
        session.list_all().await.map_err(|e| {
            error!("Listing registrations failed: {}", e);
            RegistrationError::ReadFailed(e.to_string())
        })
    }
}
