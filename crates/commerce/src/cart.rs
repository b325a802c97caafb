//! Cart management.

use common::{CartLineId, ProductId, UserId};
use domain::{CartLine, CommerceError, validate_quantity};
use store::{CartStore, Catalog};

/// Service for a user's cart.
///
/// Stock checks here are advisory: they keep obviously unfulfillable
/// lines out of the cart, but stock may drift between a cart mutation and
/// checkout, so the authoritative check happens again inside the checkout
/// commit.
#[derive(Clone)]
pub struct CartService {
    catalog: Catalog,
    carts: CartStore,
}

impl CartService {
    /// Creates a cart service over the given stores.
    pub fn new(catalog: Catalog, carts: CartStore) -> Self {
        Self { catalog, carts }
    }

    /// Lists the user's cart lines.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> Vec<CartLine> {
        self.carts.list_for_user(user_id).await
    }

    /// Adds a product to the cart, merging into an existing line for the
    /// same product.
    ///
    /// The advisory stock check is applied to the resulting line quantity,
    /// not just the increment.
    #[tracing::instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, CommerceError> {
        validate_quantity(quantity)?;
        let product = self.catalog.get(product_id).await?;

        let already_in_cart = self
            .carts
            .find_by_user_and_product(user_id, product_id)
            .await
            .map_or(0, |line| line.quantity);
        let wanted = already_in_cart + quantity;
        if product.stock < wanted {
            return Err(CommerceError::InsufficientStock {
                product: product.name,
                requested: wanted,
                available: product.stock,
            });
        }

        Ok(self.carts.upsert(user_id, product_id, quantity).await)
    }

    /// Overwrites the quantity of one of the user's cart lines.
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, CommerceError> {
        validate_quantity(quantity)?;
        let line = self.owned_line(user_id, line_id).await?;

        let product = self.catalog.get(line.product_id).await?;
        if product.stock < quantity {
            return Err(CommerceError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        self.carts.set_quantity(line_id, quantity).await
    }

    /// Removes one of the user's cart lines.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, user_id: UserId, line_id: CartLineId) -> Result<(), CommerceError> {
        self.owned_line(user_id, line_id).await?;
        self.carts.remove(line_id).await
    }

    /// Empties the user's cart. Idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) {
        self.carts.clear_for_user(user_id).await;
    }

    /// Loads a line and verifies it belongs to the caller.
    async fn owned_line(
        &self,
        user_id: UserId,
        line_id: CartLineId,
    ) -> Result<CartLine, CommerceError> {
        let line = self.carts.get(line_id).await?;
        if line.user_id != user_id {
            return Err(CommerceError::NotLineOwner(line_id));
        }
        Ok(line)
    }
}
