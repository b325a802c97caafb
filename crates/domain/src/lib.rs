//! Domain layer for the storefront backend.
//!
//! Entities, the [`Money`] value object, the order status machine, and the
//! error taxonomy shared by every core operation. Business invariants are
//! checked here at construction time; cross-entity coordination lives in
//! the `commerce` crate.

mod cart;
mod error;
mod money;
mod order;
mod payment;
mod product;

pub use cart::{CartLine, validate_quantity};
pub use error::CommerceError;
pub use money::Money;
pub use order::{Order, OrderLine, OrderStatus, StatusPolicy};
pub use payment::{Payment, PaymentStatus};
pub use product::Product;
