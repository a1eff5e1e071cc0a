use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::sync::Arc;
use tracing::{info, instrument, warn, Instrument};

use super::attributes::{self, n, s, Item};
use super::dynamodb::{DynamoDbTable, ItemFilter};
use crate::models::{MenuItem, MenuType, RepositoryResult};

/// Data access for the bar and restaurant catalogue
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Available items of one menu type, in store order
    async fn find_available_by_type(&self, menu_type: MenuType) -> RepositoryResult<Vec<MenuItem>>;

    async fn create(&self, item: MenuItem) -> RepositoryResult<MenuItem>;

    async fn count(&self) -> RepositoryResult<usize>;
}

/// DynamoDB implementation of the MenuRepository trait
pub struct DynamoDbMenuRepository {
    table: DynamoDbTable,
    menu_type_index: String,
}

impl DynamoDbMenuRepository {
    pub const KEY: &'static str = "item_id";
    pub const MENU_TYPE_INDEX: &'static str = "MenuTypeIndex";

    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            table: DynamoDbTable::new(client, table_name, region),
            menu_type_index: Self::MENU_TYPE_INDEX.to_string(),
        }
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    pub fn menu_type_index(&self) -> &str {
        &self.menu_type_index
    }

    pub fn menu_item_to_item(&self, menu_item: &MenuItem) -> Item {
        let mut item = Item::new();
        item.insert(Self::KEY.to_string(), s(&menu_item.item_id));
        item.insert("name".to_string(), s(&menu_item.name));
        item.insert("description".to_string(), s(&menu_item.description));
        item.insert("price".to_string(), n(menu_item.price));
        item.insert("category".to_string(), s(&menu_item.category));
        item.insert("menu_type".to_string(), s(menu_item.menu_type.as_str()));
        item.insert(
            "available".to_string(),
            AttributeValue::Bool(menu_item.available),
        );
        item
    }

    pub fn item_to_menu_item(&self, item: &Item) -> RepositoryResult<MenuItem> {
        Ok(MenuItem {
            item_id: attributes::string(item, Self::KEY)?,
            name: attributes::string(item, "name")?,
            description: attributes::string_or_default(item, "description"),
            price: attributes::decimal(item, "price")?,
            category: attributes::string(item, "category")?,
            menu_type: attributes::parsed(item, "menu_type")?,
            available: attributes::boolean(item, "available")?,
        })
    }
}

#[async_trait]
impl MenuRepository for DynamoDbMenuRepository {
    #[instrument(skip(self), fields(table = %self.table.name(), menu_type = %menu_type))]
    async fn find_available_by_type(&self, menu_type: MenuType) -> RepositoryResult<Vec<MenuItem>> {
        info!("Finding available menu items using GSI");

        let items = self
            .table
            .query_index(
                &self.menu_type_index,
                "menu_type",
                menu_type.as_str(),
                Some(ItemFilter::available_only()),
            )
            .await?;

        let mut menu_items = Vec::with_capacity(items.len());
        for item in &items {
            match self.item_to_menu_item(item) {
                Ok(menu_item) => menu_items.push(menu_item),
                Err(e) => {
                    warn!("Failed to parse menu item: {}", e);
                    continue;
                }
            }
        }

        info!("Found {} {} items", menu_items.len(), menu_type);
        Ok(menu_items)
    }

    #[instrument(skip(self, item), fields(table = %self.table.name(), item_id = %item.item_id))]
    async fn create(&self, item: MenuItem) -> RepositoryResult<MenuItem> {
        self.table
            .put_new(Self::KEY, self.menu_item_to_item(&item))
            .await?;
        info!("Menu item created");
        Ok(item)
    }

    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn count(&self) -> RepositoryResult<usize> {
        self.table.count().in_current_span().await
    }
}
