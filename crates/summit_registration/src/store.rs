//! Storage traits for registrations
//!
//! The intake service talks to storage through these traits so it can be
//! exercised against an in-memory store in tests. A store hands out
//! sessions; a session owns one database connection for the length of a
//! request and gives it back when dropped.

use crate::models::{NewRegistration, Registration};
use std::future::Future;
use summit_db::DbError;

/// A source of storage sessions
pub trait RegistrationStore: Send + Sync {
    /// The session type handed out by this store
    type Session: RegistrationSession + Send;

    /// Open a session, checking out a connection
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the connection target cannot be
    /// resolved, or a connection error if the database cannot be reached
    /// within the acquire timeout.
    fn open(&self) -> impl Future<Output = Result<Self::Session, DbError>> + Send;
}

/// One request's view of registration storage
pub trait RegistrationSession {
    /// Create the registrations table if it does not exist
    ///
    /// Idempotent. Stores may skip the statement once it has succeeded.
    fn ensure_schema(&mut self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Find a registration by email
    fn find_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Registration>, DbError>> + Send;

    /// Insert and commit a new registration
    ///
    /// # Returns
    ///
    /// The stored registration, with the id and timestamp assigned by the
    /// database. A unique constraint rejection is reported as an error for
    /// which [`DbError::is_unique_violation`] is true.
    fn insert(
        &mut self,
        registration: &NewRegistration,
    ) -> impl Future<Output = Result<Registration, DbError>> + Send;

    /// All registrations, newest first
    fn list_all(&mut self) -> impl Future<Output = Result<Vec<Registration>, DbError>> + Send;
}
