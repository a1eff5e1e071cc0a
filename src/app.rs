use aws_sdk_dynamodb::Client as DynamoDbClient;
use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use crate::config::DatabaseConfig;
use crate::handlers::{
    bookings, health_check, menu, metrics_handler, orders, request_validation_middleware,
    security_headers_middleware,
};
use crate::observability::{observability_middleware, Metrics};
use crate::repositories::{
    BookingRepository, DynamoDbBookingRepository, DynamoDbMenuRepository,
    DynamoDbOrderRepository, DynamoDbRoomRepository, InMemoryBookingRepository,
    InMemoryMenuRepository, InMemoryOrderRepository, InMemoryRoomRepository, MenuRepository,
    OrderRepository, RoomRepository,
};
use crate::services::{BookingService, MenuService, OrderService, QrService, SeedInitializer};

/// One handle per stored collection
#[derive(Clone)]
pub struct Repositories {
    pub rooms: Arc<dyn RoomRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            rooms: Arc::new(InMemoryRoomRepository::new()),
            menu: Arc::new(InMemoryMenuRepository::new()),
            bookings: Arc::new(InMemoryBookingRepository::new()),
            orders: Arc::new(InMemoryOrderRepository::new()),
        }
    }

    pub fn dynamodb(client: Arc<DynamoDbClient>, config: &DatabaseConfig) -> Self {
        Self {
            rooms: Arc::new(DynamoDbRoomRepository::new(
                client.clone(),
                config.rooms_table_name.clone(),
                config.region.clone(),
            )),
            menu: Arc::new(DynamoDbMenuRepository::new(
                client.clone(),
                config.menu_table_name.clone(),
                config.region.clone(),
            )),
            bookings: Arc::new(DynamoDbBookingRepository::new(
                client.clone(),
                config.bookings_table_name.clone(),
                config.region.clone(),
            )),
            orders: Arc::new(DynamoDbOrderRepository::new(
                client,
                config.orders_table_name.clone(),
                config.region.clone(),
            )),
        }
    }

    pub fn seed_initializer(&self) -> SeedInitializer {
        SeedInitializer::new(self.rooms.clone(), self.menu.clone())
    }
}

/// Shared application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<BookingService>,
    pub menu_service: Arc<MenuService>,
    pub order_service: Arc<OrderService>,
    pub qr_service: QrService,
    pub metrics: Arc<Metrics>,
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        repositories: &Repositories,
        metrics: Arc<Metrics>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            booking_service: Arc::new(BookingService::new(
                repositories.rooms.clone(),
                repositories.bookings.clone(),
            )),
            menu_service: Arc::new(MenuService::new(repositories.menu.clone())),
            order_service: Arc::new(OrderService::new(repositories.orders.clone())),
            qr_service: QrService::new(),
            metrics,
            public_base_url,
        }
    }
}

impl FromRef<AppState> for Arc<Metrics> {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}

/// Router limits taken from the server configuration
#[derive(Debug, Clone, Copy)]
pub struct RouterLimits {
    pub request_timeout: Duration,
    pub max_request_size: usize,
}

/// Build the application router with every route and middleware layer
pub fn create_app(state: AppState, limits: RouterLimits) -> Router {
    let metrics = state.metrics.clone();

    Router::new()
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        // Rooms and bookings
        .route("/api/rooms", get(bookings::list_rooms))
        .route("/api/rooms/availability", get(bookings::check_availability))
        .route(
            "/api/bookings",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route("/api/bookings/:booking_id", get(bookings::get_booking))
        // Menus and table QR codes
        .route("/api/menu/:menu_type", get(menu::get_menu))
        .route("/api/qr-code/:menu_type", get(menu::generate_qr_code))
        // Orders
        .route(
            "/api/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/api/orders/:order_id", get(orders::get_order))
        .route(
            "/api/orders/:order_id/status",
            put(orders::update_order_status),
        )
        .with_state(state)
        // Middleware layers, inner to outer
        .layer(middleware::from_fn_with_state(
            limits.max_request_size,
            request_validation_middleware,
        ))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            metrics,
            observability_middleware,
        ))
}
