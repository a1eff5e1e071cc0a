use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::models::{RepositoryError, ServiceError};

/// Error half of every handler result: status plus `{error, timestamp}` body
pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({
            "error": message.into(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Convert ServiceError to HTTP response
pub fn service_error_to_response(err: ServiceError) -> ApiError {
    let (status, message) = match err {
        ServiceError::BookingNotFound { .. } => {
            (StatusCode::NOT_FOUND, "Booking not found".to_string())
        }
        ServiceError::OrderNotFound { .. } => (StatusCode::NOT_FOUND, "Order not found".to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::InvalidMenuType { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Persistence { entity, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create {}", entity),
        ),
        ServiceError::Repository { source } => repository_error_status(&source),
        ServiceError::QrCode { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate QR code".to_string(),
        ),
    };

    error_response(status, message)
}

fn repository_error_status(source: &RepositoryError) -> (StatusCode, String) {
    match source {
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        RepositoryError::ConnectionFailed => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Database connection failed".to_string(),
        ),
        RepositoryError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timeout".to_string()),
        RepositoryError::RateLimitExceeded => (
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded".to_string(),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    }
}

/// Malformed or incomplete JSON bodies are validation errors
pub fn json_rejection_to_response(rejection: JsonRejection) -> ApiError {
    crate::warn_with_trace!(error = %rejection.body_text(), "Rejected request body");
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {}", rejection.body_text()),
    )
}

/// Missing or unparseable query parameters are validation errors
pub fn query_rejection_to_response(rejection: QueryRejection) -> ApiError {
    crate::warn_with_trace!(error = %rejection.body_text(), "Rejected query string");
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid query parameters: {}", rejection.body_text()),
    )
}
