//! Catalog endpoints. Browsing is public; maintenance requires the
//! admin role.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use commerce::SettlementGateway;
use common::ProductId;
use domain::{Money, Product};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::AdminIdentity;
use crate::error::ApiError;

use super::parse_uuid;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub unit_price_cents: i64,
    pub stock: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub unit_price_cents: i64,
    pub stock: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            unit_price_cents: product.unit_price.cents(),
            stock: product.stock,
        }
    }
}

// -- Handlers --

/// GET /products — list the whole catalog.
#[tracing::instrument(skip(state))]
pub async fn list<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<Vec<ProductResponse>> {
    let products = state.catalog.list().await;
    Json(products.into_iter().map(Into::into).collect())
}

/// GET /products/available — list products with stock remaining.
#[tracing::instrument(skip(state))]
pub async fn available<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Json<Vec<ProductResponse>> {
    let products = state.catalog.list_available().await;
    Json(products.into_iter().map(Into::into).collect())
}

/// GET /products/search?name=N — search by name.
#[tracing::instrument(skip(state))]
pub async fn search<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ProductResponse>> {
    let products = state.catalog.search(&params.name).await;
    Json(products.into_iter().map(Into::into).collect())
}

/// GET /products/:id — load one product.
#[tracing::instrument(skip(state))]
pub async fn get<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product_id = ProductId::from_uuid(parse_uuid(&id)?);
    let product = state.catalog.get(product_id).await?;
    Ok(Json(product.into()))
}

/// POST /products — create a product (admin).
#[tracing::instrument(skip(state, req))]
pub async fn create<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = Product::new(
        req.name,
        req.description,
        req.image_url,
        Money::from_cents(req.unit_price_cents),
        req.stock,
    )?;
    state.catalog.insert(product.clone()).await;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /products/:id — update a product (admin).
#[tracing::instrument(skip(state, req))]
pub async fn update<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product_id = ProductId::from_uuid(parse_uuid(&id)?);
    let unit_price = Money::from_cents(req.unit_price_cents);
    Product::validate(&req.name, unit_price)?;

    let product = Product {
        id: product_id,
        name: req.name,
        description: req.description,
        image_url: req.image_url,
        unit_price,
        stock: req.stock,
    };
    let updated = state.catalog.update(product).await?;
    Ok(Json(updated.into()))
}

/// DELETE /products/:id — remove a product (admin).
#[tracing::instrument(skip(state))]
pub async fn remove<G: SettlementGateway + 'static>(
    State(state): State<Arc<AppState<G>>>,
    _admin: AdminIdentity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id = ProductId::from_uuid(parse_uuid(&id)?);
    state.catalog.remove(product_id).await?;
    Ok(StatusCode::OK)
}
