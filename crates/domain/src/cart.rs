use common::{CartLineId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// A single (user, product, quantity) pairing awaiting checkout.
///
/// Unique per (user, product); the cart store merges quantities instead
/// of creating a second line for the same product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a new cart line with a fresh ID.
    pub fn new(user_id: UserId, product_id: ProductId, quantity: u32) -> Self {
        Self {
            id: CartLineId::new(),
            user_id,
            product_id,
            quantity,
        }
    }
}

/// Rejects a zero quantity. Called at the boundary of every cart mutation.
pub fn validate_quantity(quantity: u32) -> Result<(), CommerceError> {
    if quantity == 0 {
        return Err(CommerceError::InvalidQuantity);
    }
    Ok(())
}
