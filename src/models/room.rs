use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bookable room. Rooms are only ever written by the seed initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub room_number: u32,
    pub room_type: String,
    pub price_per_night: Decimal,
    pub available: bool,
}

impl Room {
    pub fn new(room_number: u32, room_type: &str, price_per_night: Decimal) -> Self {
        Self {
            room_id: format!("room_{}", room_number),
            room_number,
            room_type: room_type.to_string(),
            price_per_night,
            available: true,
        }
    }
}

/// Response for `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub rooms: Vec<Room>,
}

/// Response for `GET /api/rooms/availability`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available_rooms: Vec<Room>,
    pub check_in: String,
    pub check_out: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_room_creation() {
        let room = Room::new(7, "Deluxe Beachfront", dec!(120.00));

        assert_eq!(room.room_id, "room_7");
        assert_eq!(room.room_number, 7);
        assert_eq!(room.price_per_night, dec!(120.00));
        assert!(room.available);
    }

    #[test]
    fn test_room_wire_format() {
        let room = Room::new(1, "Deluxe Beachfront", dec!(120.0));
        let value = serde_json::to_value(&room).unwrap();

        assert_eq!(value["room_id"], "room_1");
        assert_eq!(value["room_number"], 1);
        assert_eq!(value["price_per_night"], 120.0);
        assert_eq!(value["available"], true);
        assert!(value.get("_id").is_none());
    }
}
