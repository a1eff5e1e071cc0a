use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use std::sync::Arc;
use tracing::{info, instrument, warn, Instrument};

use super::attributes::{self, n, s, Item};
use super::dynamodb::DynamoDbTable;
use crate::models::{Order, OrderItem, RepositoryError, RepositoryResult};

/// Data access for bar and restaurant orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Order>>;

    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>>;

    async fn create(&self, order: Order) -> RepositoryResult<Order>;

    /// Overwrite the status of an existing order.
    ///
    /// Returns `RepositoryError::NotFound` when no order has this identifier.
    /// Writing the status the order already has is a successful update.
    async fn update_status(&self, order_id: &str, status: &str) -> RepositoryResult<()>;
}

/// DynamoDB implementation of the OrderRepository trait
pub struct DynamoDbOrderRepository {
    table: DynamoDbTable,
}

impl DynamoDbOrderRepository {
    pub const KEY: &'static str = "order_id";

    pub fn new(client: Arc<DynamoDbClient>, table_name: String, region: String) -> Self {
        Self {
            table: DynamoDbTable::new(client, table_name, region),
        }
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    fn line_to_attribute(line: &OrderItem) -> AttributeValue {
        let mut map = Item::new();
        map.insert("item_id".to_string(), s(&line.item_id));
        map.insert("name".to_string(), s(&line.name));
        map.insert("price".to_string(), n(line.price));
        map.insert("quantity".to_string(), n(line.quantity));
        AttributeValue::M(map)
    }

    fn attribute_to_line(value: &AttributeValue) -> RepositoryResult<OrderItem> {
        let map = value.as_m().map_err(|_| RepositoryError::InvalidItem {
            message: "Invalid order line".to_string(),
        })?;

        Ok(OrderItem {
            item_id: attributes::string(map, "item_id")?,
            name: attributes::string(map, "name")?,
            price: attributes::decimal(map, "price")?,
            quantity: attributes::number(map, "quantity")?,
        })
    }

    pub fn order_to_item(&self, order: &Order) -> Item {
        let mut item = Item::new();
        item.insert(Self::KEY.to_string(), s(&order.order_id));
        item.insert("table_number".to_string(), s(&order.table_number));
        item.insert("customer_name".to_string(), s(&order.customer_name));
        item.insert("customer_phone".to_string(), s(&order.customer_phone));
        item.insert(
            "items".to_string(),
            AttributeValue::L(order.items.iter().map(Self::line_to_attribute).collect()),
        );
        item.insert("total_amount".to_string(), n(order.total_amount));
        item.insert("order_type".to_string(), s(order.order_type.as_str()));
        item.insert(
            "special_instructions".to_string(),
            s(&order.special_instructions),
        );
        item.insert("status".to_string(), s(&order.status));
        item.insert("created_at".to_string(), s(order.created_at.to_rfc3339()));
        item
    }

    pub fn item_to_order(&self, item: &Item) -> RepositoryResult<Order> {
        let items = attributes::list(item, "items")?
            .iter()
            .map(Self::attribute_to_line)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Order {
            order_id: attributes::string(item, Self::KEY)?,
            table_number: attributes::string_or_default(item, "table_number"),
            customer_name: attributes::string_or_default(item, "customer_name"),
            customer_phone: attributes::string_or_default(item, "customer_phone"),
            items,
            total_amount: attributes::decimal(item, "total_amount")?,
            order_type: attributes::parsed(item, "order_type")?,
            special_instructions: attributes::string_or_default(item, "special_instructions"),
            status: attributes::string(item, "status")?,
            created_at: attributes::timestamp(item, "created_at")?,
        })
    }
}

#[async_trait]
impl OrderRepository for DynamoDbOrderRepository {
    #[instrument(skip(self), fields(table = %self.table.name()))]
    async fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let items = self.table.scan_all(None).await?;

        let mut orders = Vec::with_capacity(items.len());
        for item in &items {
            match self.item_to_order(item) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    warn!("Failed to parse order item: {}", e);
                    continue;
                }
            }
        }

        info!("Found {} orders", orders.len());
        Ok(orders)
    }

    #[instrument(skip(self), fields(table = %self.table.name(), order_id = %order_id))]
    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        match self.table.get(Self::KEY, order_id).await? {
            Some(item) => Ok(Some(self.item_to_order(&item)?)),
            None => {
                info!("Order not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, order), fields(table = %self.table.name(), order_id = %order.order_id))]
    async fn create(&self, order: Order) -> RepositoryResult<Order> {
        self.table
            .put_new(Self::KEY, self.order_to_item(&order))
            .await?;
        info!("Order stored");
        Ok(order)
    }

    #[instrument(skip(self), fields(table = %self.table.name(), order_id = %order_id, status = %status))]
    async fn update_status(&self, order_id: &str, status: &str) -> RepositoryResult<()> {
        let result = self
            .table
            .client()
            .update_item()
            .table_name(self.table.name())
            .key(Self::KEY, s(order_id))
            .update_expression("SET #status = :status")
            .condition_expression("attribute_exists(order_id)")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":status", s(status))
            .send()
            .instrument(self.table.span("UpdateItem"))
            .await;

        match result {
            Ok(_) => {
                info!("Order status updated");
                Ok(())
            }
            Err(e) => match DynamoDbError::from(e) {
                DynamoDbError::ConditionalCheckFailedException(_) => {
                    info!("Order not found for status update");
                    Err(RepositoryError::NotFound)
                }
                other => Err(self.table.map_error(other)),
            },
        }
    }
}
