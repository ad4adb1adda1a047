// --- File: crates/summit_registration/src/models.rs ---

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Registration {
    /// Assigned by the database on insert
    pub id: i64,
    pub name: String,
    /// Unique across all registrations
    pub email: String,
    /// Empty when the attendee left no message
    pub message: String,
    /// Assigned by the database on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated registration that has not been stored yet
///
/// Only [`NewRegistration::validate`] builds one, so holding a value means
/// the fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) message: String,
}

impl NewRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Request body for `POST /register`
///
/// Every field is optional at the JSON level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /register`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterResponse {
    pub success: bool,
    /// Human readable outcome
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Machine readable failure reason, e.g. `email_already_registered`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query string for `GET /registrations`
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// Shared access key
    pub key: Option<String>,
}

/// Response body for `GET /registrations`
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationListResponse {
    pub success: bool,
    pub count: usize,
    pub registrations: Vec<Registration>,
}
