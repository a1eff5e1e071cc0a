// Services module - business logic layer

pub mod booking_service;
pub mod menu_service;
pub mod order_service;
pub mod qr_service;
pub mod seed;

pub use booking_service::BookingService;
pub use menu_service::MenuService;
pub use order_service::OrderService;
pub use qr_service::QrService;
pub use seed::{SeedInitializer, SeedReport};
