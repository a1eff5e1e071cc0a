use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    validate_date, AvailabilityResponse, Booking, BookingCreatedResponse, BookingListResponse,
    CreateBookingRequest, RoomListResponse, ServiceError, ServiceResult, Validate,
};
use crate::repositories::{BookingRepository, RoomRepository};

/// Nightly rate charged for every booking
pub const NIGHTLY_RATE: Decimal = dec!(120.00);
/// Bookings are currently always charged for a single night
pub const BILLED_NIGHTS: u32 = 1;

/// Rooms, availability and bookings
pub struct BookingService {
    rooms: Arc<dyn RoomRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(rooms: Arc<dyn RoomRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { rooms, bookings }
    }

    /// All rooms as stored
    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> ServiceResult<RoomListResponse> {
        let rooms = self.rooms.find_all().await?;
        crate::info_with_trace!("Listed {} rooms", rooms.len());
        Ok(RoomListResponse { rooms })
    }

    /// Rooms flagged available. The dates are validated and echoed back but do
    /// not filter the result: existing bookings are not consulted.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        check_in: &str,
        check_out: &str,
    ) -> ServiceResult<AvailabilityResponse> {
        validate_date("check_in", check_in)?;
        validate_date("check_out", check_out)?;

        let available_rooms = self.rooms.find_available().await?;
        crate::info_with_trace!("{} rooms available", available_rooms.len());

        Ok(AvailabilityResponse {
            available_rooms,
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        })
    }

    #[instrument(skip(self, request), fields(room_type = %request.room_type))]
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> ServiceResult<BookingCreatedResponse> {
        request.validate()?;

        let total_price = NIGHTLY_RATE * Decimal::from(BILLED_NIGHTS);
        let booking = Booking::new(request, total_price);

        let booking = self.bookings.create(booking).await.map_err(|source| {
            crate::error_with_trace!(error = %source, "Failed to store booking");
            ServiceError::Persistence {
                entity: "booking",
                source,
            }
        })?;

        crate::info_with_trace!(booking_id = %booking.booking_id, "Booking created");
        Ok(BookingCreatedResponse::from(&booking))
    }

    #[instrument(skip(self))]
    pub async fn list_bookings(&self) -> ServiceResult<BookingListResponse> {
        let bookings = self.bookings.find_all().await?;
        Ok(BookingListResponse { bookings })
    }

    #[instrument(skip(self))]
    pub async fn get_booking(&self, booking_id: &str) -> ServiceResult<Booking> {
        match self.bookings.find_by_id(booking_id).await? {
            Some(booking) => Ok(booking),
            None => {
                crate::warn_with_trace!("Booking not found");
                Err(ServiceError::BookingNotFound {
                    id: booking_id.to_string(),
                })
            }
        }
    }
}
