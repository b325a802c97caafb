//! Order records.

use std::collections::HashMap;
use std::sync::Arc;

use common::{OrderId, UserId};
use domain::{CommerceError, Order, OrderStatus};
use tokio::sync::RwLock;

/// Order records. Orders are inserted once at checkout and never deleted;
/// only the status field is ever updated afterwards.
#[derive(Clone, Default)]
pub struct OrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl OrderStore {
    /// Creates an empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly checked-out order.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    /// Loads an order by ID.
    pub async fn get(&self, order_id: OrderId) -> Result<Order, CommerceError> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(CommerceError::OrderNotFound(order_id))
    }

    /// Lists a user's orders, newest first.
    pub async fn list_for_user(&self, user_id: UserId) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut mine: Vec<_> = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine
    }

    /// Lists every order, newest first.
    pub async fn list_all(&self) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut all: Vec<_> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Lists orders in a given status, newest first.
    pub async fn list_by_status(&self, status: OrderStatus) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut matching: Vec<_> = orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }

    /// Overwrites an order's status. Transition checks belong to the
    /// caller; the store records whatever it is told.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, CommerceError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or(CommerceError::OrderNotFound(order_id))?;
        order.status = status;
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ProductId;
    use domain::{Money, OrderLine};

    fn order_for(user: UserId) -> Order {
        Order::new(
            user,
            vec![OrderLine::new(
                ProductId::new(),
                "Widget",
                1,
                Money::from_cents(1000),
            )],
        )
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = OrderStore::new();
        let order = order_for(UserId::new());
        store.insert(order.clone()).await;
        assert_eq!(store.get(order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn get_unknown_order() {
        let store = OrderStore::new();
        let id = OrderId::new();
        assert_eq!(
            store.get(id).await.unwrap_err(),
            CommerceError::OrderNotFound(id)
        );
    }

    #[tokio::test]
    async fn list_for_user_is_newest_first() {
        let store = OrderStore::new();
        let user = UserId::new();

        let mut older = order_for(user);
        older.created_at -= chrono::Duration::minutes(5);
        let newer = order_for(user);

        store.insert(older.clone()).await;
        store.insert(newer.clone()).await;
        store.insert(order_for(UserId::new())).await;

        let mine = store.list_for_user(user).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, newer.id);
        assert_eq!(mine[1].id, older.id);
    }

    #[tokio::test]
    async fn list_by_status_filters() {
        let store = OrderStore::new();
        let order = order_for(UserId::new());
        store.insert(order.clone()).await;
        store.set_status(order.id, OrderStatus::Paid).await.unwrap();
        store.insert(order_for(UserId::new())).await;

        assert_eq!(store.list_by_status(OrderStatus::Paid).await.len(), 1);
        assert_eq!(store.list_by_status(OrderStatus::Pending).await.len(), 1);
        assert!(store.list_by_status(OrderStatus::Delivered).await.is_empty());
    }

    #[tokio::test]
    async fn set_status_returns_updated_order() {
        let store = OrderStore::new();
        let order = order_for(UserId::new());
        store.insert(order.clone()).await;

        let updated = store
            .set_status(order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        // Total untouched by status changes.
        assert_eq!(updated.total, order.total);
    }
}
