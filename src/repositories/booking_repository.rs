use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::attributes::{self, n, s, Item};
use super::dynamodb::DynamoDbTable;
use crate::models::{Booking, RepositoryResult};

/// Data access for room bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Booking>>;

    async fn find_by_id(&self, booking_id: &str) -> RepositoryResult<Option<Booking>>;

    async fn create(&self, booking: Booking) -> RepositoryResult<Booking>;
}

/// DynamoDB implementation of the BookingRepository trait
pub struct DynamoDbBookingRepository {
    table: DynamoDbTable,
}

impl DynamoDbBookingRepository {
    pub const KEY: &'static str = "booking_id";

    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            table: DynamoDbTable::new(client, table_name, region),
        }
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    pub fn booking_to_item(&self, booking: &Booking) -> Item {
        let mut item = Item::new();
        item.insert(Self::KEY.to_string(), s(&booking.booking_id));
        item.insert("guest_name".to_string(), s(&booking.guest_name));
        item.insert("guest_email".to_string(), s(&booking.guest_email));
        item.insert("guest_phone".to_string(), s(&booking.guest_phone));
        item.insert("check_in_date".to_string(), s(&booking.check_in_date));
        item.insert("check_out_date".to_string(), s(&booking.check_out_date));
        item.insert("room_type".to_string(), s(&booking.room_type));
        item.insert("number_of_guests".to_string(), n(booking.number_of_guests));
        item.insert("special_requests".to_string(), s(&booking.special_requests));
        item.insert("status".to_string(), s(booking.status.to_string()));
        item.insert("created_at".to_string(), s(booking.created_at.to_rfc3339()));
        item.insert("total_price".to_string(), n(booking.total_price));
        item
    }

    pub fn item_to_booking(&self, item: &Item) -> RepositoryResult<Booking> {
        Ok(Booking {
            booking_id: attributes::string(item, Self::KEY)?,
            guest_name: attributes::string(item, "guest_name")?,
            guest_email: attributes::string(item, "guest_email")?,
            guest_phone: attributes::string(item, "guest_phone")?,
            check_in_date: attributes::string(item, "check_in_date")?,
            check_out_date: attributes::string(item, "check_out_date")?,
            room_type: attributes::string(item, "room_type")?,
            number_of_guests: attributes::number(item, "number_of_guests")?,
            special_requests: attributes::string_or_default(item, "special_requests"),
            status: attributes::parsed(item, "status")?,
            created_at: attributes::timestamp(item, "created_at")?,
            total_price: attributes::decimal(item, "total_price")?,
        })
    }
}

#[async_trait]
impl BookingRepository for DynamoDbBookingRepository {
    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn find_all(&self) -> RepositoryResult<Vec<Booking>> {
        let items = self.table.scan_all(None).await?;

        let mut bookings = Vec::with_capacity(items.len());
        for item in &items {
            match self.item_to_booking(item) {
                Ok(booking) => bookings.push(booking),
                Err(e) => {
                    warn!("Failed to parse booking item: {}", e);
                    continue;
                }
            }
        }

        info!("Found {} bookings", bookings.len());
        Ok(bookings)
    }

    #[instrument(skip(self), fields(table = %self.table.name(), booking_id = %booking_id))]
    async fn find_by_id(&self, booking_id: &str) -> RepositoryResult<Option<Booking>> {
        match self.table.get(Self::KEY, booking_id).await? {
            Some(item) => Ok(Some(self.item_to_booking(&item)?)),
            None => {
                info!("Booking not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, booking), fields(table = %self.table.name(), booking_id = %booking.booking_id))]
    async fn create(&self, booking: Booking) -> RepositoryResult<Booking> {
        self.table
            .put_new(Self::KEY, self.booking_to_item(&booking))
            .await?;
        info!("Booking stored");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, CreateBookingRequest};
    use aws_sdk_dynamodb::types::AttributeValue;
    use rust_decimal_macros::dec;

    fn create_test_repository() -> DynamoDbBookingRepository {
        let config = aws_sdk_dynamodb::Config::builder()
            .region(aws_sdk_dynamodb::config::Region::new("us-east-1"))
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .build();
        let client = Arc::new(aws_sdk_dynamodb::Client::from_conf(config));
        DynamoDbBookingRepository::new(client, "test-bookings".to_string(), "us-east-1".to_string())
    }

    fn create_test_booking() -> Booking {
        Booking::new(
            CreateBookingRequest {
                guest_name: "Elira Krasniqi".to_string(),
                guest_email: "elira@example.com".to_string(),
                guest_phone: "+355 68 000 0000".to_string(),
                check_in_date: "2025-08-10".to_string(),
                check_out_date: "2025-08-14".to_string(),
                room_type: "Deluxe Beachfront".to_string(),
                number_of_guests: 3,
                special_requests: None,
            },
            dec!(120.00),
        )
    }

    #[test]
    fn test_booking_item_conversion() {
        let repo = create_test_repository();
        let booking = create_test_booking();

        let item = repo.booking_to_item(&booking);
        assert_eq!(item.get("status"), Some(&AttributeValue::S("confirmed".to_string())));
        assert_eq!(item.get("special_requests"), Some(&AttributeValue::S(String::new())));

        let converted = repo.item_to_booking(&item).unwrap();
        assert_eq!(converted.booking_id, booking.booking_id);
        assert_eq!(converted.status, BookingStatus::Confirmed);
        assert_eq!(converted.total_price, dec!(120.00));
        assert_eq!(converted.number_of_guests, 3);
        assert_eq!(
            converted.created_at.timestamp_micros(),
            booking.created_at.timestamp_micros()
        );
    }

    #[test]
    fn test_item_without_created_at_is_rejected() {
        let repo = create_test_repository();
        let mut item = repo.booking_to_item(&create_test_booking());
        item.remove("created_at");

        assert!(repo.item_to_booking(&item).is_err());
    }
}
