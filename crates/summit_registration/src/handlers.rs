//! HTTP handlers for registration intake
//!
//! Designed for the Axum web framework. OpenAPI descriptions live in
//! `doc.rs` behind the `openapi` feature.

use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use summit_common::{not_found, HttpStatusCode, SummitError};
use tracing::{debug, warn};

use crate::models::{ListQuery, RegisterRequest, RegisterResponse, RegistrationListResponse};
use crate::service::RegistrationService;
use crate::store_sql::SqlRegistrationStore;

/// Shared state for registration handlers
#[derive(Debug)]
pub struct RegistrationState {
    /// The intake service used by both endpoints
    pub service: RegistrationService<SqlRegistrationStore>,
    /// SHA-256 of the listing access key; `None` disables the listing
    access_key_digest: Option<[u8; 32]>,
}

fn digest(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}

impl RegistrationState {
    pub fn new(store: SqlRegistrationStore, access_key: Option<&str>) -> Self {
        Self {
            service: RegistrationService::new(store),
            access_key_digest: access_key.filter(|k| !k.is_empty()).map(digest),
        }
    }

    /// Whether `GET /registrations` is served at all.
    pub fn listing_enabled(&self) -> bool {
        self.access_key_digest.is_some()
    }

    /// Check a presented listing key.
    ///
    /// # Errors
    ///
    /// `NotFoundError` when no key is configured, `AuthError` when the key
    /// is missing or wrong.
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), SummitError> {
        let Some(expected) = self.access_key_digest else {
            return Err(not_found("Registration listing is not enabled."));
        };
        match presented {
            Some(key) if digest(key) == expected => Ok(()),
            _ => {
                warn!("Rejected registrations listing with a missing or wrong key");
                Err(SummitError::AuthError(
                    "Invalid or unauthorized access key.".to_string(),
                ))
            }
        }
    }
}

fn register_response(status: StatusCode, body: RegisterResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Handler for `POST /register`
///
/// Responds `201` with the new id, `400` for invalid input, `409` when the
/// email is taken and `500` with a generic message for storage failures.
pub async fn register_handler(
    State(state): State<Arc<RegistrationState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!("Rejected registration body: {}", rejection.body_text());
            return register_response(
                StatusCode::BAD_REQUEST,
                RegisterResponse {
                    success: false,
                    message: "Request body must be a JSON object.".to_string(),
                    email: None,
                    id: None,
                    error: Some("invalid_json".to_string()),
                },
            );
        }
    };

    let result = state
        .service
        .register(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
            request.message.as_deref().unwrap_or_default(),
        )
        .await;

    match result {
        Ok(registration) => register_response(
            StatusCode::CREATED,
            RegisterResponse {
                success: true,
                message: "Registration received. See you at the summit!".to_string(),
                email: Some(registration.email),
                id: Some(registration.id),
                error: None,
            },
        ),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            register_response(
                status,
                RegisterResponse {
                    success: false,
                    message: err.public_message(),
                    email: None,
                    id: None,
                    error: Some(err.reason().to_string()),
                },
            )
        }
    }
}

/// Handler for `GET /registrations?key=...`
pub async fn list_registrations_handler(
    State(state): State<Arc<RegistrationState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RegistrationListResponse>, SummitError> {
    state.authorize(query.key.as_deref())?;

    let registrations = state.service.list().await?;
    Ok(Json(RegistrationListResponse {
        success: true,
        count: registrations.len(),
        registrations,
    }))
}
