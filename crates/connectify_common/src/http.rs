// --- File: crates/connectify_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{ConnectifyError, HttpStatusCode};

/// Renders `{"error": {"message", "code"}}` with the error's status.
///
/// Server-side failures (any 5xx) answer with the status's reason phrase
/// only; the full error goes to the log.
impl IntoResponse for ConnectifyError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = if status_code.is_server_error() {
            tracing::error!("Request failed with {}: {}", status_code.as_u16(), self);
            status_code
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}
