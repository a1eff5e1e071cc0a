use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::error::{
    json_rejection_to_response, query_rejection_to_response, service_error_to_response, ApiError,
};
use crate::app::AppState;
use crate::models::{
    AvailabilityResponse, Booking, BookingCreatedResponse, BookingListResponse,
    CreateBookingRequest, RoomListResponse,
};

/// Query parameters for the availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: String,
    pub check_out: String,
}

/// List all rooms
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<RoomListResponse>, ApiError> {
    match state.booking_service.list_rooms().await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            crate::error_with_trace!("Failed to list rooms: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Rooms flagged available for the requested stay
#[instrument(name = "check_availability", skip(state, query))]
pub async fn check_availability(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let Query(query) = query.map_err(query_rejection_to_response)?;

    state
        .booking_service
        .check_availability(&query.check_in, &query.check_out)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Create a booking
#[instrument(name = "create_booking", skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<BookingCreatedResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        state.metrics.record_booking(false);
        json_rejection_to_response(rejection)
    })?;

    let result = state.booking_service.create_booking(request).await;
    state.metrics.record_booking(result.is_ok());

    match result {
        Ok(created) => {
            crate::info_with_trace!("Booking {} created", created.booking_id);
            Ok(Json(created))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create booking: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List all bookings
#[instrument(name = "list_bookings", skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<BookingListResponse>, ApiError> {
    state
        .booking_service
        .list_bookings()
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Get a specific booking by ID
#[instrument(name = "get_booking", skip(state), fields(booking_id = %booking_id))]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    state
        .booking_service
        .get_booking(&booking_id)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}
