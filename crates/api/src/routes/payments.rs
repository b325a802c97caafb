//! Payment endpoints: creation, settlement, and administrative queries.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use commerce::SettlementGateway;
use common::{OrderId, PaymentId};
use domain::{Money, Payment, PaymentStatus};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::AdminIdentity;
use crate::error::ApiError;

use super::parse_uuid;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub order_id: String,
    pub amount_cents: i64,
    pub method: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub order_id: String,
    pub amount_cents: i64,
    pub method: String,
    pub status: String,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            order_id: payment.order_id.to_string(),
            amount_cents: payment.amount.cents(),
            method: payment.method,
            status: payment.status.to_string(),
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /payments — create a payment for an order.
#[tracing::instrument(skip(state, req))]
pub async fn create<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let order_id = OrderId::from_uuid(parse_uuid(&req.order_id)?);
    let payment = state
        .payments
        .create(order_id, Money::from_cents(req.amount_cents), &req.method)
        .await?;
    Ok(Json(payment.into()))
}

/// POST /payments/:id/process — settle a pending payment.
#[tracing::instrument(skip(state))]
pub async fn process<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id = PaymentId::from_uuid(parse_uuid(&id)?);
    let payment = state.payments.process(payment_id).await?;
    Ok(Json(payment.into()))
}

/// GET /payments/admin/all — every payment, newest first (admin).
#[tracing::instrument(skip(state))]
pub async fn admin_all<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
) -> Json<Vec<PaymentResponse>> {
    let payments = state.payments.list_all().await;
    Json(payments.into_iter().map(Into::into).collect())
}

/// GET /payments/admin/:id — load one payment (admin).
#[tracing::instrument(skip(state))]
pub async fn admin_get<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id = PaymentId::from_uuid(parse_uuid(&id)?);
    let payment = state.payments.get(payment_id).await?;
    Ok(Json(payment.into()))
}

/// GET /payments/admin/status/:status — payments in one status (admin).
#[tracing::instrument(skip(state))]
pub async fn admin_by_status<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(status): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let status: PaymentStatus = status.parse().map_err(ApiError::BadRequest)?;
    let payments = state.payments.list_by_status(status).await;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// PUT /payments/admin/:id/status?status=S — override a payment's status
/// (admin). Marking Paid cascades the order; marking Failed never
/// reverts stock reserved at checkout.
#[tracing::instrument(skip(state))]
pub async fn admin_set_status<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
    Query(params): Query<StatusParams>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let payment_id = PaymentId::from_uuid(parse_uuid(&id)?);
    let status: PaymentStatus = params.status.parse().map_err(ApiError::BadRequest)?;
    let payment = state.payments.set_status(payment_id, status).await?;
    Ok(Json(payment.into()))
}
