use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// A catalog product.
///
/// Owned by the catalog; the core reads price and stock and mutates stock
/// only through the stock ledger. Stock is a `u32`, so it cannot go
/// negative by construction — the ledger still checks before every
/// decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub unit_price: Money,
    pub stock: u32,
}

impl Product {
    /// Creates a product after validating its fields.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        image_url: Option<String>,
        unit_price: Money,
        stock: u32,
    ) -> Result<Self, CommerceError> {
        let name = name.into();
        Self::validate(&name, unit_price)?;
        Ok(Self {
            id: ProductId::new(),
            name,
            description,
            image_url,
            unit_price,
            stock,
        })
    }

    /// Field-level validation, also applied on catalog updates.
    pub fn validate(name: &str, unit_price: Money) -> Result<(), CommerceError> {
        if name.trim().is_empty() {
            return Err(CommerceError::BlankProductName);
        }
        if !unit_price.is_positive() {
            return Err(CommerceError::InvalidPrice);
        }
        Ok(())
    }
}
