//! Event registration intake for the Summit registration service
//!
//! Attendees register with a name, an email address and an optional
//! message. Each email can register once: a pre-insert lookup gives a
//! friendly answer, and the unique constraint on the table settles races
//! between concurrent requests.
//!
//! # Features
//!
//! - Input validation that never touches storage
//! - Lazily created `registrations` table, for MySQL and SQLite
//! - Storage behind the [`RegistrationStore`] trait
//! - Access-key protected listing of registrations
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use summit_config::{ConnectionResolver, DatabaseSettings};
//! use summit_db::LazyDbClient;
//! use summit_registration::{routes, RegistrationState, SqlRegistrationStore};
//!
//! fn setup_app() -> axum::Router {
//!     let settings = DatabaseSettings::default();
//!     let db = Arc::new(LazyDbClient::new(ConnectionResolver::from_env(&settings), settings));
//!     let state = RegistrationState::new(SqlRegistrationStore::new(db), None);
//!     routes(Arc::new(state))
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /register` - Register an attendee
//! - `GET /registrations?key=...` - List registrations, newest first

#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_test;
pub mod store;
pub mod store_sql;
pub mod validation;

pub use error::RegistrationError;
pub use handlers::RegistrationState;
pub use models::{NewRegistration, Registration, RegisterRequest, RegisterResponse};
pub use routes::routes;
pub use service::RegistrationService;
pub use store::{RegistrationSession, RegistrationStore};
pub use store_sql::SqlRegistrationStore;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::RegistrationApiDoc;
}
