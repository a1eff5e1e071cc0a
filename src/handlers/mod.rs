pub mod bookings;
pub mod error;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod middleware;
pub mod orders;

pub use error::{service_error_to_response, ApiError};
pub use health::health_check;
pub use metrics::metrics_handler;
pub use middleware::{request_validation_middleware, security_headers_middleware};
