//! # Error Handling Middleware
//!
//! Maps core [`SlotError`]s to HTTP status codes and a JSON body of the form
//! `{ "error": message }`, so every handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinicslots_core::errors::SlotError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicslots_api::middleware::error_handling::AppError;
/// use clinicslots_core::time::{to_12_hour, TwelveHourTime};
///
/// async fn handler(time: String) -> Result<Json<TwelveHourTime>, AppError> {
///     Ok(Json(to_12_hour(&time)?))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SlotError::InvalidTime(_) => StatusCode::BAD_REQUEST,
            SlotError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SlotError::Upstream(_) => StatusCode::BAD_GATEWAY,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}
