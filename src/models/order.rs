use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MenuType, INITIAL_ORDER_STATUS};

/// A single ordered product, captured by value at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Stored bar or restaurant order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub table_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub order_type: MenuType,
    pub special_instructions: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub items: Vec<OrderItem>,
    pub order_type: String,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// Response for a successfully placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: String,
    pub total_amount: Decimal,
}

/// Response for `GET /api/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

/// Response for `PUT /api/orders/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdatedResponse {
    pub message: String,
}

impl Default for OrderStatusUpdatedResponse {
    fn default() -> Self {
        Self {
            message: "Order status updated successfully".to_string(),
        }
    }
}

/// Sum of price × quantity over all lines, using the prices the client sent
pub fn order_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::line_total).sum()
}

impl Order {
    /// Create a pending order; `order_type` must already be validated
    pub fn new(request: CreateOrderRequest, order_type: MenuType) -> Self {
        let total_amount = order_total(&request.items);
        Self {
            order_id: Uuid::new_v4().to_string(),
            table_number: request.table_number.unwrap_or_default(),
            customer_name: request.customer_name.unwrap_or_default(),
            customer_phone: request.customer_phone.unwrap_or_default(),
            items: request.items,
            total_amount,
            order_type,
            special_instructions: request.special_instructions.unwrap_or_default(),
            status: INITIAL_ORDER_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }
}

impl From<&Order> for OrderCreatedResponse {
    fn from(order: &Order) -> Self {
        Self {
            message: "Order created successfully".to_string(),
            order_id: order.order_id.clone(),
            total_amount: order.total_amount,
        }
    }
}
