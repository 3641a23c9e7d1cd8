use axum::{http::StatusCode, response::IntoResponse};
use clinicslots_api::middleware::error_handling::AppError;
use clinicslots_core::errors::SlotError;

fn status_of(error: SlotError) -> StatusCode {
    AppError(error).into_response().status()
}

#[tokio::test]
async fn test_error_handling_invalid_input() {
    assert_eq!(
        status_of(SlotError::InvalidTime("25:00".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(SlotError::InvalidDate("2024-13".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_of(SlotError::Validation("Invalid input".to_string())),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_error_handling_not_found() {
    assert_eq!(
        status_of(SlotError::NotFound("Resource not found".to_string())),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_error_handling_authentication() {
    assert_eq!(
        status_of(SlotError::Authentication("Session expired".to_string())),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_error_handling_upstream() {
    assert_eq!(
        status_of(SlotError::Upstream(eyre::eyre!("connection refused"))),
        StatusCode::BAD_GATEWAY
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = SlotError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
}
