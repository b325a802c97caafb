//! Orders, order lines, and the order status machine.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// The status of an order in its lifecycle.
///
/// ```text
/// Pending ──► Paid ──► Shipped ──► Delivered
/// ```
///
/// Pending is the sole initial state; Delivered is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Checked out, awaiting payment.
    #[default]
    Pending,

    /// Payment settled.
    Paid,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer (terminal).
    Delivered,
}

impl OrderStatus {
    /// Returns true if `next` is one forward step in the transition table.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Paid, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }

    /// Advances to Paid when payment settles.
    ///
    /// Only reachable from Pending; a no-op when already Paid so that
    /// settlement cascades stay idempotent.
    pub fn advance_to_paid(self) -> Result<OrderStatus, CommerceError> {
        match self {
            OrderStatus::Pending | OrderStatus::Paid => Ok(OrderStatus::Paid),
            other => Err(CommerceError::InvalidTransition {
                from: other,
                to: OrderStatus::Paid,
            }),
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// How administrative status overrides are checked against the table.
///
/// The original workflow let any admin assign any status, which is useful
/// for manual order correction but bypasses the lifecycle. Both behaviors
/// are kept behind this switch instead of picking one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any assignment is allowed.
    #[default]
    Permissive,

    /// Only single forward steps from the transition table are allowed.
    /// Re-assigning the current status is a no-op, not an error.
    Strict,
}

impl StatusPolicy {
    /// Checks an administrative status assignment.
    pub fn check(self, from: OrderStatus, to: OrderStatus) -> Result<(), CommerceError> {
        match self {
            StatusPolicy::Permissive => Ok(()),
            StatusPolicy::Strict if from == to || from.can_transition_to(to) => Ok(()),
            StatusPolicy::Strict => Err(CommerceError::InvalidTransition { from, to }),
        }
    }
}

impl std::str::FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permissive" => Ok(StatusPolicy::Permissive),
            "strict" => Ok(StatusPolicy::Strict),
            other => Err(format!("unknown status policy: {other}")),
        }
    }
}

/// A product snapshot inside an order.
///
/// The unit price is captured at checkout time, so historical totals are
/// immune to later catalog price edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns quantity × snapshot price.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An order created from a cart at checkout.
///
/// Lines are owned by value; the total is computed from them once, at
/// construction, and never recomputed or edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Creates a Pending order; the total is the sum of line totals.
    pub fn new(user_id: UserId, lines: Vec<OrderLine>) -> Self {
        let total = lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        Self {
            id: OrderId::new(),
            user_id,
            lines,
            total,
            created_at: Utc::now(),
            status: OrderStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));

        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Paid.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn advance_to_paid_from_pending() {
        assert_eq!(
            OrderStatus::Pending.advance_to_paid().unwrap(),
            OrderStatus::Paid
        );
    }

    #[test]
    fn advance_to_paid_is_idempotent() {
        assert_eq!(
            OrderStatus::Paid.advance_to_paid().unwrap(),
            OrderStatus::Paid
        );
    }

    #[test]
    fn advance_to_paid_rejected_after_shipment() {
        assert!(OrderStatus::Shipped.advance_to_paid().is_err());
        assert!(OrderStatus::Delivered.advance_to_paid().is_err());
    }

    #[test]
    fn only_delivered_is_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
    }

    #[test]
    fn permissive_policy_allows_anything() {
        let policy = StatusPolicy::Permissive;
        assert!(policy.check(OrderStatus::Delivered, OrderStatus::Pending).is_ok());
        assert!(policy.check(OrderStatus::Pending, OrderStatus::Delivered).is_ok());
    }

    #[test]
    fn strict_policy_enforces_the_table() {
        let policy = StatusPolicy::Strict;
        assert!(policy.check(OrderStatus::Pending, OrderStatus::Paid).is_ok());
        assert!(policy.check(OrderStatus::Paid, OrderStatus::Paid).is_ok());
        assert_eq!(
            policy
                .check(OrderStatus::Delivered, OrderStatus::Pending)
                .unwrap_err(),
            CommerceError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            }
        );
        assert!(policy.check(OrderStatus::Pending, OrderStatus::Shipped).is_err());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("strict".parse::<StatusPolicy>().unwrap(), StatusPolicy::Strict);
        assert_eq!(
            "Permissive".parse::<StatusPolicy>().unwrap(),
            StatusPolicy::Permissive
        );
        assert!("lenient".parse::<StatusPolicy>().is_err());
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("Paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_total_is_sum_of_line_totals() {
        let lines = vec![
            OrderLine::new(ProductId::new(), "Widget", 2, Money::from_cents(1000)),
            OrderLine::new(ProductId::new(), "Gadget", 3, Money::from_cents(250)),
        ];
        let order = Order::new(UserId::new(), lines);
        assert_eq!(order.total.cents(), 2750);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn status_serializes_as_variant_name() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"Shipped\"");
    }
}
