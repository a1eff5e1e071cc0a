use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::instrument;

pub const SERVICE_DISPLAY_NAME: &str = "Hotel Ulin API";

/// Health check endpoint handler
#[instrument(name = "health_check")]
pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": SERVICE_DISPLAY_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
