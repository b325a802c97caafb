//! Payment records.

use std::collections::HashMap;
use std::sync::Arc;

use common::{OrderId, PaymentId};
use domain::{CommerceError, Payment, PaymentStatus};
use tokio::sync::RwLock;

/// Payment records, at most one per order.
///
/// The per-order uniqueness is enforced here, under the insert's write
/// lock, so two concurrent `create_payment` calls for the same order
/// cannot both succeed.
#[derive(Clone, Default)]
pub struct PaymentStore {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl PaymentStore {
    /// Creates an empty payment store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a payment, rejecting a second payment for the same order.
    pub async fn insert(&self, payment: Payment) -> Result<Payment, CommerceError> {
        let mut payments = self.payments.write().await;
        if payments.values().any(|p| p.order_id == payment.order_id) {
            return Err(CommerceError::DuplicatePayment(payment.order_id));
        }
        payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    /// Loads a payment by ID.
    pub async fn get(&self, payment_id: PaymentId) -> Result<Payment, CommerceError> {
        self.payments
            .read()
            .await
            .get(&payment_id)
            .cloned()
            .ok_or(CommerceError::PaymentNotFound(payment_id))
    }

    /// Finds the payment referencing an order, if any.
    pub async fn find_by_order(&self, order_id: OrderId) -> Option<Payment> {
        self.payments
            .read()
            .await
            .values()
            .find(|p| p.order_id == order_id)
            .cloned()
    }

    /// Lists every payment, newest first.
    pub async fn list_all(&self) -> Vec<Payment> {
        let payments = self.payments.read().await;
        let mut all: Vec<_> = payments.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Lists payments in a given status, newest first.
    pub async fn list_by_status(&self, status: PaymentStatus) -> Vec<Payment> {
        let payments = self.payments.read().await;
        let mut matching: Vec<_> = payments
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }

    /// Sets the status only when the current status matches `expected`,
    /// failing with `AlreadyProcessed` otherwise.
    ///
    /// Check and write happen under one guard, so two concurrent
    /// settlements of the same payment cannot both succeed.
    pub async fn set_status_if(
        &self,
        payment_id: PaymentId,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<Payment, CommerceError> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(&payment_id)
            .ok_or(CommerceError::PaymentNotFound(payment_id))?;
        if payment.status != expected {
            return Err(CommerceError::AlreadyProcessed(payment_id));
        }
        payment.status = next;
        Ok(payment.clone())
    }

    /// Overwrites a payment's status.
    pub async fn set_status(
        &self,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<Payment, CommerceError> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(&payment_id)
            .ok_or(CommerceError::PaymentNotFound(payment_id))?;
        payment.status = status;
        Ok(payment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Money;

    fn payment_for(order_id: OrderId) -> Payment {
        Payment::new(order_id, Money::from_cents(2000), "card").unwrap()
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = PaymentStore::new();
        let payment = payment_for(OrderId::new());
        store.insert(payment.clone()).await.unwrap();
        assert_eq!(store.get(payment.id).await.unwrap(), payment);
    }

    #[tokio::test]
    async fn second_payment_for_same_order_rejected() {
        let store = PaymentStore::new();
        let order_id = OrderId::new();
        store.insert(payment_for(order_id)).await.unwrap();

        let err = store.insert(payment_for(order_id)).await.unwrap_err();
        assert_eq!(err, CommerceError::DuplicatePayment(order_id));
    }

    #[tokio::test]
    async fn find_by_order() {
        let store = PaymentStore::new();
        let order_id = OrderId::new();
        let payment = store.insert(payment_for(order_id)).await.unwrap();

        assert_eq!(store.find_by_order(order_id).await.unwrap().id, payment.id);
        assert!(store.find_by_order(OrderId::new()).await.is_none());
    }

    #[tokio::test]
    async fn set_status_if_rejects_stale_expectation() {
        let store = PaymentStore::new();
        let payment = store.insert(payment_for(OrderId::new())).await.unwrap();

        store
            .set_status_if(payment.id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap();

        let err = store
            .set_status_if(payment.id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await
            .unwrap_err();
        assert_eq!(err, CommerceError::AlreadyProcessed(payment.id));
    }

    #[tokio::test]
    async fn set_status_and_filter() {
        let store = PaymentStore::new();
        let payment = store.insert(payment_for(OrderId::new())).await.unwrap();
        store
            .set_status(payment.id, PaymentStatus::Paid)
            .await
            .unwrap();

        assert_eq!(store.list_by_status(PaymentStatus::Paid).await.len(), 1);
        assert!(store.list_by_status(PaymentStatus::Pending).await.is_empty());
    }
}
