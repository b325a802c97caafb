//! HTTP API server for the storefront backend.
//!
//! REST endpoints for catalog browsing, cart management, checkout, and
//! payment settlement, with structured logging (tracing) and Prometheus
//! metrics.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use commerce::{AutoApprove, CartService, OrderService, PaymentService, SettlementGateway};
use domain::StatusPolicy;
use metrics_exporter_prometheus::PrometheusHandle;
use store::{CartStore, Catalog, OrderStore, PaymentStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<G: SettlementGateway> {
    pub catalog: Catalog,
    pub carts: CartService,
    pub orders: OrderService,
    pub payments: PaymentService<G>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G: SettlementGateway + 'static>(
    state: Arc<AppState<G>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/products",
            get(routes::products::list::<G>).post(routes::products::create::<G>),
        )
        .route("/products/available", get(routes::products::available::<G>))
        .route("/products/search", get(routes::products::search::<G>))
        .route(
            "/products/{id}",
            get(routes::products::get::<G>)
                .put(routes::products::update::<G>)
                .delete(routes::products::remove::<G>),
        )
        .route(
            "/cart",
            get(routes::cart::list::<G>)
                .post(routes::cart::add::<G>)
                .delete(routes::cart::clear::<G>),
        )
        .route(
            "/cart/{line_id}",
            put(routes::cart::set_quantity::<G>).delete(routes::cart::remove::<G>),
        )
        .route(
            "/orders",
            post(routes::orders::create::<G>).get(routes::orders::list::<G>),
        )
        .route("/orders/admin/all", get(routes::orders::admin_all::<G>))
        .route(
            "/orders/admin/status/{status}",
            get(routes::orders::admin_by_status::<G>),
        )
        .route(
            "/orders/admin/{id}/status",
            put(routes::orders::admin_set_status::<G>),
        )
        .route("/orders/{id}", get(routes::orders::get::<G>))
        .route("/payments", post(routes::payments::create::<G>))
        .route(
            "/payments/{id}/process",
            post(routes::payments::process::<G>),
        )
        .route("/payments/admin/all", get(routes::payments::admin_all::<G>))
        .route(
            "/payments/admin/status/{status}",
            get(routes::payments::admin_by_status::<G>),
        )
        .route("/payments/admin/{id}", get(routes::payments::admin_get::<G>))
        .route(
            "/payments/admin/{id}/status",
            put(routes::payments::admin_set_status::<G>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: empty in-memory stores and the
/// auto-approving settlement gateway.
pub fn create_default_state(policy: StatusPolicy) -> Arc<AppState<AutoApprove>> {
    let catalog = Catalog::new();
    let cart_store = CartStore::new();
    let order_store = OrderStore::new();

    let orders = OrderService::new(catalog.clone(), cart_store.clone(), order_store, policy);
    let carts = CartService::new(catalog.clone(), cart_store);
    let payments = PaymentService::new(orders.clone(), PaymentStore::new(), AutoApprove);

    Arc::new(AppState {
        catalog,
        carts,
        orders,
        payments,
    })
}
