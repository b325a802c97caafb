//! Payment creation and settlement.

use async_trait::async_trait;
use common::{OrderId, PaymentId};
use domain::{CommerceError, Money, Payment, PaymentStatus};
use store::PaymentStore;

use crate::checkout::OrderService;

/// Seam for an external payment provider.
///
/// Settlement is a local state transition in this system; a real
/// gateway integration would be injected here.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Settles a pending payment with the provider.
    async fn settle(&self, payment: &Payment) -> Result<(), CommerceError>;
}

/// Gateway that approves every settlement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl SettlementGateway for AutoApprove {
    async fn settle(&self, _payment: &Payment) -> Result<(), CommerceError> {
        Ok(())
    }
}

/// Service for the payment lifecycle.
///
/// Creates at most one payment per order, settles it exactly once, and
/// cascades settlement into the order status machine. A failed or voided
/// payment never reverts stock reserved at checkout.
#[derive(Clone)]
pub struct PaymentService<G: SettlementGateway> {
    orders: OrderService,
    payments: PaymentStore,
    gateway: G,
}

impl<G: SettlementGateway> PaymentService<G> {
    /// Creates a payment service over the given stores and gateway.
    pub fn new(orders: OrderService, payments: PaymentStore, gateway: G) -> Self {
        Self {
            orders,
            payments,
            gateway,
        }
    }

    /// Creates a Pending payment for an order.
    ///
    /// The amount must equal the order total exactly; the payment store
    /// enforces the one-payment-per-order rule on insert.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        order_id: OrderId,
        amount: Money,
        method: &str,
    ) -> Result<Payment, CommerceError> {
        let order = self.orders.get(order_id).await?;

        if self.payments.find_by_order(order_id).await.is_some() {
            return Err(CommerceError::DuplicatePayment(order_id));
        }
        if amount != order.total {
            return Err(CommerceError::AmountMismatch {
                expected: order.total,
                actual: amount,
            });
        }

        let payment = Payment::new(order_id, amount, method)?;
        self.payments.insert(payment).await
    }

    /// Settles a Pending payment and advances the owning order to Paid.
    #[tracing::instrument(skip(self))]
    pub async fn process(&self, payment_id: PaymentId) -> Result<Payment, CommerceError> {
        let payment = self.payments.get(payment_id).await?;
        if payment.status != PaymentStatus::Pending {
            return Err(CommerceError::AlreadyProcessed(payment_id));
        }

        self.gateway.settle(&payment).await?;

        // Cascade before flipping the payment: if the order cannot accept
        // the transition, the payment must stay Pending.
        self.orders.mark_paid(payment.order_id).await?;
        let payment = self
            .payments
            .set_status_if(payment_id, PaymentStatus::Pending, PaymentStatus::Paid)
            .await?;

        metrics::counter!("payments_settled").increment(1);
        tracing::info!(%payment_id, order_id = %payment.order_id, "payment settled");
        Ok(payment)
    }

    /// Administrative status override, unchecked.
    ///
    /// Paid cascades the order exactly like [`process`](Self::process);
    /// Failed leaves stock reserved at checkout committed.
    #[tracing::instrument(skip(self))]
    pub async fn set_status(
        &self,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<Payment, CommerceError> {
        let payment = self.payments.get(payment_id).await?;
        if status == PaymentStatus::Paid {
            self.orders.mark_paid(payment.order_id).await?;
        }
        self.payments.set_status(payment_id, status).await
    }

    /// Loads a payment by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, payment_id: PaymentId) -> Result<Payment, CommerceError> {
        self.payments.get(payment_id).await
    }

    /// Lists every payment, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Vec<Payment> {
        self.payments.list_all().await
    }

    /// Lists payments in a given status, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_status(&self, status: PaymentStatus) -> Vec<Payment> {
        self.payments.list_by_status(status).await
    }
}
