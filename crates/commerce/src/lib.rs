//! Cart, checkout, and payment services.
//!
//! All cross-entity coordination lives here: the cart's advisory stock
//! checks, the two-phase checkout that turns a cart into an order, and
//! the payment lifecycle that cascades settlement into the order status
//! machine. The stores below this layer only persist records; every
//! business rule is enforced in these services.

mod cart;
mod checkout;
mod payment;

pub use cart::CartService;
pub use checkout::OrderService;
pub use payment::{AutoApprove, PaymentService, SettlementGateway};
