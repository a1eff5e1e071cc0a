use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use tracing::{info, instrument, warn, Instrument};

use super::attributes::{self, n, s, Item};
use super::dynamodb::{DynamoDbTable, ItemFilter};
use crate::models::{RepositoryResult, Room};

/// Data access for the rooms collection
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Every room, in store order
    async fn find_all(&self) -> RepositoryResult<Vec<Room>>;

    /// Rooms whose availability flag is set
    async fn find_available(&self) -> RepositoryResult<Vec<Room>>;

    async fn create(&self, room: Room) -> RepositoryResult<Room>;

    async fn count(&self) -> RepositoryResult<usize>;
}

/// DynamoDB implementation of the RoomRepository trait
pub struct DynamoDbRoomRepository {
    table: DynamoDbTable,
}

impl DynamoDbRoomRepository {
    pub const KEY: &'static str = "room_id";

    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            table: DynamoDbTable::new(client, table_name, region),
        }
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    pub fn room_to_item(&self, room: &Room) -> Item {
        let mut item = Item::new();
        item.insert(Self::KEY.to_string(), s(&room.room_id));
        item.insert("room_number".to_string(), n(room.room_number));
        item.insert("room_type".to_string(), s(&room.room_type));
        item.insert("price_per_night".to_string(), n(room.price_per_night));
        item.insert("available".to_string(), AttributeValue::Bool(room.available));
        item
    }

    pub fn item_to_room(&self, item: &Item) -> RepositoryResult<Room> {
        Ok(Room {
            room_id: attributes::string(item, Self::KEY)?,
            room_number: attributes::number(item, "room_number")?,
            room_type: attributes::string(item, "room_type")?,
            price_per_night: attributes::decimal(item, "price_per_night")?,
            available: attributes::boolean(item, "available")?,
        })
    }

    fn items_to_rooms(&self, items: Vec<Item>) -> Vec<Room> {
        items
            .iter()
            .filter_map(|item| match self.item_to_room(item) {
                Ok(room) => Some(room),
                Err(e) => {
                    warn!("Failed to parse room item: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl RoomRepository for DynamoDbRoomRepository {
    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn find_all(&self) -> RepositoryResult<Vec<Room>> {
        let items = self.table.scan_all(None).await?;
        let rooms = self.items_to_rooms(items);
        info!("Found {} rooms", rooms.len());
        Ok(rooms)
    }

    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn find_available(&self) -> RepositoryResult<Vec<Room>> {
        let items = self
            .table
            .scan_all(Some(ItemFilter::available_only()))
            .await?;
        let rooms = self.items_to_rooms(items);
        info!("Found {} available rooms", rooms.len());
        Ok(rooms)
    }

    #[instrument(skip(self, room), fields(table = %self.table.name(), room_id = %room.room_id))]
    async fn create(&self, room: Room) -> RepositoryResult<Room> {
        self.table
            .put_new(Self::KEY, self.room_to_item(&room))
            .await?;
        info!("Room created");
        Ok(room)
    }

    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn count(&self) -> RepositoryResult<usize> {
        self.table.count().in_current_span().await
    }
}
