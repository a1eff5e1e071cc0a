use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    validate_menu_type, validate_order_status, CreateOrderRequest, Order, OrderCreatedResponse,
    OrderListResponse, OrderStatusUpdatedResponse, RepositoryError, ServiceError, ServiceResult,
    Validate,
};
use crate::repositories::OrderRepository;

/// Bar and restaurant orders
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Place an order. The total is Σ(price × quantity) over the lines as sent;
    /// prices are not checked against the menu.
    #[instrument(skip(self, request), fields(order_type = %request.order_type, lines = request.items.len()))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> ServiceResult<OrderCreatedResponse> {
        request.validate()?;
        let order_type = validate_menu_type("order_type", &request.order_type)?;

        let order = Order::new(request, order_type);

        let order = self.repository.create(order).await.map_err(|source| {
            crate::error_with_trace!(error = %source, "Failed to store order");
            ServiceError::Persistence {
                entity: "order",
                source,
            }
        })?;

        crate::info_with_trace!(
            order_id = %order.order_id,
            total_amount = %order.total_amount,
            "Order created"
        );
        Ok(OrderCreatedResponse::from(&order))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> ServiceResult<OrderListResponse> {
        let orders = self.repository.find_all().await?;
        Ok(OrderListResponse { orders })
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> ServiceResult<Order> {
        match self.repository.find_by_id(order_id).await? {
            Some(order) => Ok(order),
            None => {
                crate::warn_with_trace!("Order not found");
                Err(ServiceError::OrderNotFound {
                    id: order_id.to_string(),
                })
            }
        }
    }

    /// Set a free-form status on an existing order. Setting the status the
    /// order already has succeeds.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> ServiceResult<OrderStatusUpdatedResponse> {
        validate_order_status(status)?;

        match self.repository.update_status(order_id, status.trim()).await {
            Ok(()) => {
                crate::info_with_trace!("Order status updated");
                Ok(OrderStatusUpdatedResponse::default())
            }
            Err(RepositoryError::NotFound) => {
                crate::warn_with_trace!("Order not found for status update");
                Err(ServiceError::OrderNotFound {
                    id: order_id.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
