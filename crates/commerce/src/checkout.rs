//! Checkout and order management.

use common::{OrderId, ProductId, UserId};
use domain::{CommerceError, Order, OrderLine, OrderStatus, StatusPolicy};
use store::{CartStore, Catalog, OrderStore};

/// Service for checkout and the order lifecycle.
///
/// Checkout is two-phase: a validation pass over a consistent stock
/// snapshot, then per-line atomic reservations. A reservation that loses
/// a race against a concurrent checkout rolls back every unit this
/// attempt already reserved, so a half-created order is never observable.
#[derive(Clone)]
pub struct OrderService {
    catalog: Catalog,
    carts: CartStore,
    orders: OrderStore,
    policy: StatusPolicy,
}

impl OrderService {
    /// Creates an order service over the given stores.
    pub fn new(catalog: Catalog, carts: CartStore, orders: OrderStore, policy: StatusPolicy) -> Self {
        Self {
            catalog,
            carts,
            orders,
            policy,
        }
    }

    /// Converts the user's cart into an order.
    ///
    /// Reserves stock, snapshots prices into order lines, computes the
    /// total, persists the order, and clears the cart. All-or-nothing:
    /// on any failure the cart and stock are left as they were.
    #[tracing::instrument(skip(self))]
    pub async fn checkout(&self, user_id: UserId) -> Result<Order, CommerceError> {
        metrics::counter!("checkout_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.checkout_inner(user_id).await;

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        if result.is_err() {
            metrics::counter!("checkout_failed").increment(1);
        }
        result
    }

    async fn checkout_inner(&self, user_id: UserId) -> Result<Order, CommerceError> {
        let cart_lines = self.carts.list_for_user(user_id).await;
        if cart_lines.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        // Validation phase: every line against one consistent stock
        // snapshot, no mutation on failure.
        let wanted: Vec<(ProductId, u32)> = cart_lines
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect();
        self.catalog.check_stock(&wanted).await?;

        // Commit phase: reserve line by line. Each reservation re-checks
        // stock at the moment of the decrement; validation above may be
        // stale the instant a concurrent checkout commits.
        let mut reserved: Vec<(ProductId, u32)> = Vec::with_capacity(cart_lines.len());
        let mut lines = Vec::with_capacity(cart_lines.len());
        for cart_line in &cart_lines {
            match self
                .catalog
                .try_reserve(cart_line.product_id, cart_line.quantity)
                .await
            {
                Ok(product) => {
                    reserved.push((cart_line.product_id, cart_line.quantity));
                    lines.push(OrderLine::new(
                        product.id,
                        product.name,
                        cart_line.quantity,
                        product.unit_price,
                    ));
                }
                Err(err) => {
                    // Undo this attempt's reservations before reporting.
                    for &(product_id, quantity) in &reserved {
                        self.catalog.release(product_id, quantity).await;
                    }
                    tracing::warn!(%user_id, error = %err, "checkout lost stock race, rolled back");
                    return Err(err);
                }
            }
        }

        let order = Order::new(user_id, lines);
        self.orders.insert(order.clone()).await;
        self.carts.clear_for_user(user_id).await;

        tracing::info!(order_id = %order.id, total = %order.total, "order created");
        Ok(order)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, order_id: OrderId) -> Result<Order, CommerceError> {
        self.orders.get(order_id).await
    }

    /// Lists the user's orders, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Vec<Order> {
        self.orders.list_for_user(user_id).await
    }

    /// Lists every order, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Vec<Order> {
        self.orders.list_all().await
    }

    /// Lists orders in a given status, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders.list_by_status(status).await
    }

    /// Administrative status override, checked against the configured
    /// strictness policy.
    ///
    /// Stock reserved at checkout is never touched here, whatever the
    /// assignment.
    #[tracing::instrument(skip(self))]
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, CommerceError> {
        let order = self.orders.get(order_id).await?;
        self.policy.check(order.status, status)?;
        self.orders.set_status(order_id, status).await
    }

    /// Settlement cascade: advances the order to Paid through the status
    /// machine. No-op when the order is already Paid.
    pub(crate) async fn mark_paid(&self, order_id: OrderId) -> Result<Order, CommerceError> {
        let order = self.orders.get(order_id).await?;
        let next = order.status.advance_to_paid()?;
        if next == order.status {
            return Ok(order);
        }
        self.orders.set_status(order_id, next).await
    }
}
