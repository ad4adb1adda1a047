use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{list_registrations_handler, register_handler, RegistrationState};

/// Create registration routes for the API
///
/// Mounted under `/api` by the backend.
///
/// # Arguments
///
/// * `state` - Shared handler state, built once at startup
///
/// # Returns
///
/// An Axum router with `POST /register` and `GET /registrations`
pub fn routes(state: Arc<RegistrationState>) -> Router {
    if state.listing_enabled() {
        info!("Registration routes initialized (listing enabled)");
    } else {
        info!("Registration routes initialized");
    }

    Router::new()
        .route("/register", post(register_handler))
        .route("/registrations", get(list_registrations_handler))
        .with_state(state)
}
