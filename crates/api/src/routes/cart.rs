//! Cart endpoints. Every route acts on the authenticated caller's cart.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use commerce::SettlementGateway;
use common::{CartLineId, ProductId};
use domain::CartLine;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

use super::parse_uuid;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct QuantityParams {
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartLineResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            product_id: line.product_id.to_string(),
            quantity: line.quantity,
        }
    }
}

// -- Handlers --

/// GET /cart — the caller's cart lines.
#[tracing::instrument(skip(state))]
pub async fn list<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
) -> Json<Vec<CartLineResponse>> {
    let lines = state.carts.list(identity.user_id).await;
    Json(lines.into_iter().map(Into::into).collect())
}

/// POST /cart — add a product, merging into an existing line.
#[tracing::instrument(skip(state, req))]
pub async fn add<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartLineResponse>, ApiError> {
    let product_id = ProductId::from_uuid(parse_uuid(&req.product_id)?);
    let line = state
        .carts
        .add(identity.user_id, product_id, req.quantity)
        .await?;
    Ok(Json(line.into()))
}

/// PUT /cart/:line_id?quantity=N — overwrite a line's quantity.
#[tracing::instrument(skip(state))]
pub async fn set_quantity<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
    Path(line_id): Path<String>,
    Query(params): Query<QuantityParams>,
) -> Result<Json<CartLineResponse>, ApiError> {
    let line_id = CartLineId::from_uuid(parse_uuid(&line_id)?);
    let line = state
        .carts
        .set_quantity(identity.user_id, line_id, params.quantity)
        .await?;
    Ok(Json(line.into()))
}

/// DELETE /cart/:line_id — remove a single line.
#[tracing::instrument(skip(state))]
pub async fn remove<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
    Path(line_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let line_id = CartLineId::from_uuid(parse_uuid(&line_id)?);
    state.carts.remove(identity.user_id, line_id).await?;
    Ok(StatusCode::OK)
}

/// DELETE /cart — empty the caller's cart.
#[tracing::instrument(skip(state))]
pub async fn clear<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    identity: Identity,
) -> StatusCode {
    state.carts.clear(identity.user_id).await;
    StatusCode::OK
}
