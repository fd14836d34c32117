use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};
use crate::errors::ReportError;

impl IntoResponse for ReportError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ReportError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ReportError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            ReportError::NotAdmin { .. } => (StatusCode::FORBIDDEN, self.to_string()),
            ReportError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({"error": message}))).into_response()
    }
}
