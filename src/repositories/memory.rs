//! In-memory repositories, used for `HOTEL_STORAGE_BACKEND=memory` and tests.
//!
//! Each collection is an insertion-ordered vector behind a tokio `RwLock`, so
//! list reads come back in the order records were written.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{BookingRepository, MenuRepository, OrderRepository, RoomRepository};
use crate::models::{Booking, MenuItem, MenuType, Order, RepositoryError, RepositoryResult, Room};

/// Insertion-ordered records keyed by a string identifier
struct Collection<T> {
    name: &'static str,
    records: RwLock<Vec<T>>,
    key: fn(&T) -> &str,
}

impl<T: Clone> Collection<T> {
    fn new(name: &'static str, key: fn(&T) -> &str) -> Self {
        Self {
            name,
            records: RwLock::new(Vec::new()),
            key,
        }
    }

    async fn all(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    async fn get(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| (self.key)(record) == id)
            .cloned()
    }

    async fn insert(&self, record: T) -> RepositoryResult<T> {
        let mut records = self.records.write().await;
        let id = (self.key)(&record);
        if records.iter().any(|existing| (self.key)(existing) == id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("{} {} already exists", self.name, id),
            });
        }
        debug!(collection = self.name, id = %id, "Inserted record");
        records.push(record.clone());
        Ok(record)
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

pub struct InMemoryRoomRepository {
    rooms: Collection<Room>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: Collection::new("room", |room| room.room_id.as_str()),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        Ok(self.rooms.all().await)
    }

    async fn find_available(&self) -> RepositoryResult<Vec<Room>> {
        Ok(self.rooms.filtered(|room| room.available).await)
    }

    #[instrument(skip(self, room), fields(room_id = %room.room_id))]
    async fn create(&self, room: Room) -> RepositoryResult<Room> {
        self.rooms.insert(room).await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.rooms.len().await)
    }
}

pub struct InMemoryMenuRepository {
    items: Collection<MenuItem>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self {
            items: Collection::new("menu item", |item| item.item_id.as_str()),
        }
    }
}

impl Default for InMemoryMenuRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find_available_by_type(&self, menu_type: MenuType) -> RepositoryResult<Vec<MenuItem>> {
        Ok(self
            .items
            .filtered(|item| item.menu_type == menu_type && item.available)
            .await)
    }

    #[instrument(skip(self, item), fields(item_id = %item.item_id))]
    async fn create(&self, item: MenuItem) -> RepositoryResult<MenuItem> {
        self.items.insert(item).await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.items.len().await)
    }
}

pub struct InMemoryBookingRepository {
    bookings: Collection<Booking>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Collection::new("booking", |booking| booking.booking_id.as_str()),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Booking>> {
        Ok(self.bookings.all().await)
    }

    async fn find_by_id(&self, booking_id: &str) -> RepositoryResult<Option<Booking>> {
        Ok(self.bookings.get(booking_id).await)
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.booking_id))]
    async fn create(&self, booking: Booking) -> RepositoryResult<Booking> {
        self.bookings.insert(booking).await
    }
}

pub struct InMemoryOrderRepository {
    orders: Collection<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Collection::new("order", |order| order.order_id.as_str()),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        Ok(self.orders.all().await)
    }

    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        Ok(self.orders.get(order_id).await)
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn create(&self, order: Order) -> RepositoryResult<Order> {
        self.orders.insert(order).await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, order_id: &str, status: &str) -> RepositoryResult<()> {
        let mut orders = self.orders.records.write().await;
        let order = orders
            .iter_mut()
            .find(|order| order.order_id == order_id)
            .ok_or(RepositoryError::NotFound)?;
        order.status = status.to_string();
        Ok(())
    }
}
