// Repositories module - data access layer

pub mod attributes;
pub mod booking_repository;
pub mod dynamodb;
pub mod memory;
pub mod menu_repository;
pub mod order_repository;
pub mod room_repository;
pub mod table_manager;

pub use booking_repository::{BookingRepository, DynamoDbBookingRepository};
pub use memory::{
    InMemoryBookingRepository, InMemoryMenuRepository, InMemoryOrderRepository,
    InMemoryRoomRepository,
};
pub use menu_repository::{DynamoDbMenuRepository, MenuRepository};
pub use order_repository::{DynamoDbOrderRepository, OrderRepository};
pub use room_repository::{DynamoDbRoomRepository, RoomRepository};
pub use table_manager::TableManager;
