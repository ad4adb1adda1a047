// --- File: crates/summit_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{HttpStatusCode, SummitError};

/// Extension trait for SummitError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for SummitError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed: {}", self);
        }

        // Same envelope the registration endpoints use
        let body = Json(json!({
            "success": false,
            "message": self.message(),
            "code": status_code.as_u16(),
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for SummitError to make it easier to use in Axum handlers.
impl IntoResponse for SummitError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_error_response_envelope() {
        let response = SummitError::ConflictError("This email is already registered.".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "This email is already registered.");
        assert_eq!(json["code"], 409);
    }
}
