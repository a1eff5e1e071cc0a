use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BookingStatus;

/// Stored room booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub room_type: String,
    pub number_of_guests: u32,
    pub special_requests: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub total_price: Decimal,
}

/// Request body for `POST /api/bookings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub room_type: String,
    pub number_of_guests: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Response for a successfully created booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub message: String,
    pub booking_id: String,
    pub total_price: Decimal,
}

/// Response for `GET /api/bookings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
}

impl Booking {
    /// Create a confirmed booking with a fresh identifier
    pub fn new(request: CreateBookingRequest, total_price: Decimal) -> Self {
        Self {
            booking_id: Uuid::new_v4().to_string(),
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            guest_phone: request.guest_phone,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            room_type: request.room_type,
            number_of_guests: request.number_of_guests,
            special_requests: request.special_requests.unwrap_or_default(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            total_price,
        }
    }
}

impl From<&Booking> for BookingCreatedResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            message: "Booking created successfully".to_string(),
            booking_id: booking.booking_id.clone(),
            total_price: booking.total_price,
        }
    }
}
