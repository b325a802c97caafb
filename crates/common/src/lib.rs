//! Shared types used across the storefront crates.

mod types;

pub use types::{CartLineId, OrderId, PaymentId, ProductId, UserId};
