use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Json,
};
use tracing::instrument;

use super::error::{service_error_to_response, ApiError};
use crate::app::AppState;
use crate::models::{MenuResponse, MenuType, QrCodeResponse};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";
const FALLBACK_HOST: &str = "localhost";

/// Grouped menu for the bar or the restaurant
#[instrument(name = "get_menu", skip(state), fields(menu_type = %menu_type))]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_type): Path<String>,
) -> Result<Json<MenuResponse>, ApiError> {
    let result = state.menu_service.get_menu(&menu_type).await;
    state
        .metrics
        .record_menu_request(menu_type_label(&menu_type), result.is_ok());

    result.map(Json).map_err(|err| {
        crate::warn_with_trace!("Failed to get {} menu: {}", menu_type, err);
        service_error_to_response(err)
    })
}

/// QR code for the ordering page of one menu
#[instrument(name = "generate_qr_code", skip(state, headers), fields(menu_type = %menu_type))]
pub async fn generate_qr_code(
    State(state): State<AppState>,
    Path(menu_type): Path<String>,
    headers: HeaderMap,
) -> Result<Json<QrCodeResponse>, ApiError> {
    let base_url = resolve_base_url(state.public_base_url.as_deref(), &headers);

    match state.qr_service.generate(&menu_type, &base_url) {
        Ok(response) => {
            state.metrics.record_qr_code(response.menu_type.as_str());
            Ok(Json(response))
        }
        Err(err) => {
            crate::warn_with_trace!("Failed to generate QR code: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Externally visible base URL: configured value first, then proxy headers,
/// then the Host header.
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured.filter(|b| !b.trim().is_empty()) {
        return base.trim_end_matches('/').to_string();
    }

    let proto = header_value(headers, FORWARDED_PROTO).unwrap_or("http");
    let host = header_value(headers, FORWARDED_HOST)
        .or_else(|| header_value(headers, header::HOST.as_str()))
        .unwrap_or(FALLBACK_HOST);

    format!("{}://{}", proto, host)
}

/// Metric label for a client-supplied menu type; unknown values share one label
pub fn menu_type_label(menu_type: &str) -> &'static str {
    menu_type
        .parse::<MenuType>()
        .map(|t| t.as_str())
        .unwrap_or("invalid")
}

// First value of a possibly comma-separated header
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
