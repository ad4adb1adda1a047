//! HTTP service for Digital Future Summit registrations
//!
//! Assembles the router served by the `summit-backend` binary:
//!
//! - `GET /` - service status, including database reachability
//! - `GET /api/health` - runs `SELECT 1` against the database
//! - `POST /api/register`, `GET /api/registrations` - see `summit-registration`
//! - `GET /api/docs` - Swagger UI (with the `openapi` feature)

use axum::{extract::State, routing::get, Json, Router};
use http::StatusCode;
use serde::Serialize;
use summit_common::{log_result, not_found, SummitError};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

pub mod app_state;

pub use app_state::AppState;

const SERVICE_NAME: &str = "Digital Future Summit registration API";

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
    /// `connected` or `unavailable`
    pub database: &'static str,
}

/// Body of `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `success` or `error`
    pub status: &'static str,
    pub message: &'static str,
}

async fn root_handler(State(state): State<AppState>) -> Json<ServiceStatus> {
    let database = if state.db.is_healthy().await {
        "connected"
    } else {
        "unavailable"
    };
    Json(ServiceStatus {
        status: "running",
        service: SERVICE_NAME,
        database,
    })
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let client = match state.db.get().await {
        Ok(client) => client,
        Err(err) => {
            error!("Health check could not connect: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    message: "Could not connect to the database. Check credentials and host.",
                }),
            );
        }
    };

    match client.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "success",
                message: "Database connection OK (SELECT 1).",
            }),
        ),
        Err(err) => {
            error!("Health check query failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    message: "Connected, but the test query failed.",
                }),
            )
        }
    }
}

async fn fallback_handler() -> SummitError {
    not_found("Route not found.")
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .merge(summit_registration::routes(state.registrations.clone()));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .route("/", get(root_handler))
        .with_state(state)
        .nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use summit_registration::openapi::RegistrationApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Summit Registration API",
                version = "0.1.0",
                description = "Registration endpoints for the Digital Future Summit"
            ),
            components(),
            tags( (name = "Summit", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(RegistrationApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Connect to the database and create the registrations table.
///
/// Best effort: failures are logged, and the first request tries again.
pub async fn warm_up(state: AppState) {
    let store = state.registration_store();
    match store.db().warm_up().await {
        Ok(client) => {
            info!("Database ready: {}", client);
            let _ = log_result(
                store.init_schema().await,
                "Registrations table ready",
                "Could not prepare the registrations table",
            );
        }
        Err(err) => {
            warn!(
                "Database not reachable at startup, will retry on first request: {}",
                err
            );
        }
    }
}
