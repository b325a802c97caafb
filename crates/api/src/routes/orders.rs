//! Order endpoints: checkout, order queries, and administrative status
//! overrides.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use commerce::SettlementGateway;
use common::OrderId;
use domain::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::{AdminIdentity, Identity};
use crate::error::ApiError;

use super::parse_uuid;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub lines: Vec<OrderLineResponse>,
    pub total_cents: i64,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            status: order.status.to_string(),
            lines: order
                .lines
                .into_iter()
                .map(|line| OrderLineResponse {
                    product_id: line.product_id.to_string(),
                    product_name: line.product_name,
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price.cents(),
                })
                .collect(),
            total_cents: order.total.cents(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /orders — check out the caller's cart.
#[tracing::instrument(skip(state))]
pub async fn create<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.checkout(identity.user_id).await?;
    Ok(Json(order.into()))
}

/// GET /orders — the caller's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
) -> Json<Vec<OrderResponse>> {
    let orders = state.orders.list_for_user(identity.user_id).await;
    Json(orders.into_iter().map(Into::into).collect())
}

/// GET /orders/:id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = OrderId::from_uuid(parse_uuid(&id)?);
    let order = state.orders.get(order_id).await?;
    Ok(Json(order.into()))
}

/// GET /orders/admin/all — every order, newest first (admin).
#[tracing::instrument(skip(state))]
pub async fn admin_all<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
) -> Json<Vec<OrderResponse>> {
    let orders = state.orders.list_all().await;
    Json(orders.into_iter().map(Into::into).collect())
}

/// GET /orders/admin/status/:status — orders in one status (admin).
#[tracing::instrument(skip(state))]
pub async fn admin_by_status<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(status): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let status: OrderStatus = status.parse().map_err(ApiError::BadRequest)?;
    let orders = state.orders.list_by_status(status).await;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// PUT /orders/admin/:id/status?status=S — override an order's status
/// (admin), subject to the configured strictness policy.
#[tracing::instrument(skip(state))]
pub async fn admin_set_status<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
    Query(params): Query<StatusParams>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = OrderId::from_uuid(parse_uuid(&id)?);
    let status: OrderStatus = params.status.parse().map_err(ApiError::BadRequest)?;
    let order = state.orders.set_status(order_id, status).await?;
    Ok(Json(order.into()))
}
