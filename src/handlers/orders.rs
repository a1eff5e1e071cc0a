use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::menu::menu_type_label;
use super::error::{
    json_rejection_to_response, query_rejection_to_response, service_error_to_response, ApiError,
};
use crate::app::AppState;
use crate::models::{
    CreateOrderRequest, Order, OrderCreatedResponse, OrderListResponse,
    OrderStatusUpdatedResponse,
};

/// Query parameters for a status change
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// Place a bar or restaurant order
#[instrument(name = "create_order", skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderCreatedResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        state.metrics.record_order("invalid", false);
        json_rejection_to_response(rejection)
    })?;

    let order_type = menu_type_label(&request.order_type);
    let result = state.order_service.create_order(request).await;
    state.metrics.record_order(order_type, result.is_ok());

    match result {
        Ok(created) => {
            crate::info_with_trace!(
                "Order {} created, total {}",
                created.order_id,
                created.total_amount
            );
            Ok(Json(created))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create order: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List all orders
#[instrument(name = "list_orders", skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<OrderListResponse>, ApiError> {
    state
        .order_service
        .list_orders()
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Get a specific order by ID
#[instrument(name = "get_order", skip(state), fields(order_id = %order_id))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    state
        .order_service
        .get_order(&order_id)
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

/// Replace an order's status
#[instrument(name = "update_order_status", skip(state, query), fields(order_id = %order_id))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<OrderStatusUpdatedResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        state.metrics.record_order_status_update(false);
        query_rejection_to_response(rejection)
    })?;

    let result = state
        .order_service
        .update_order_status(&order_id, &query.status)
        .await;
    state.metrics.record_order_status_update(result.is_ok());

    result.map(Json).map_err(|err| {
        crate::warn_with_trace!("Failed to update order {}: {}", order_id, err);
        service_error_to_response(err)
    })
}
