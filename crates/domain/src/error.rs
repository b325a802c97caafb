//! The error taxonomy shared by every core operation.

use common::{CartLineId, OrderId, PaymentId, ProductId};
use thiserror::Error;

use crate::money::Money;
use crate::order::OrderStatus;

/// Errors that can occur during cart, checkout, and payment operations.
///
/// Every failure is surfaced synchronously to the caller; nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommerceError {
    /// No product exists with the given ID.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No cart line exists with the given ID.
    #[error("cart line {0} not found")]
    CartLineNotFound(CartLineId),

    /// No order exists with the given ID.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// No payment exists with the given ID.
    #[error("payment {0} not found")]
    PaymentNotFound(PaymentId),

    /// The cart line belongs to a different user.
    #[error("cart line {0} belongs to another user")]
    NotLineOwner(CartLineId),

    /// Requested quantity exceeds the available stock.
    #[error("insufficient stock for product '{product}': requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Checkout was attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Quantity must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Product name must not be blank.
    #[error("product name must not be blank")]
    BlankProductName,

    /// Product price must be strictly positive.
    #[error("product price must be positive")]
    InvalidPrice,

    /// Payment method must not be blank.
    #[error("payment method must not be blank")]
    BlankPaymentMethod,

    /// Payment amount must be strictly positive.
    #[error("payment amount must be positive")]
    InvalidAmount,

    /// A payment already exists for the order.
    #[error("a payment already exists for order {0}")]
    DuplicatePayment(OrderId),

    /// Payment amount does not equal the order total.
    #[error("payment amount {actual} does not match order total {expected}")]
    AmountMismatch { expected: Money, actual: Money },

    /// The payment is no longer in the Pending state.
    #[error("payment {0} has already been processed")]
    AlreadyProcessed(PaymentId),

    /// The requested order status change is not in the transition table.
    #[error("invalid order status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}
