use chrono::{DateTime, Utc};
use common::{OrderId, PaymentId};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// The status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Created, not yet settled.
    #[default]
    Pending,

    /// Settled successfully.
    Paid,

    /// Settlement failed or was voided by an administrator.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// A payment against an order.
///
/// References the order by ID only; at most one payment may exist per
/// order, enforced by the payment store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Money,
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a Pending payment after validating amount and method.
    ///
    /// Amount equality with the order total is checked by the payment
    /// service, which is the only place the order is in scope.
    pub fn new(
        order_id: OrderId,
        amount: Money,
        method: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let method = method.into();
        if method.trim().is_empty() {
            return Err(CommerceError::BlankPaymentMethod);
        }
        if !amount.is_positive() {
            return Err(CommerceError::InvalidAmount);
        }
        Ok(Self {
            id: PaymentId::new(),
            order_id,
            amount,
            method,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
