//! Cart line records.

use std::collections::HashMap;
use std::sync::Arc;

use common::{CartLineId, ProductId, UserId};
use domain::{CartLine, CommerceError};
use tokio::sync::RwLock;

/// Per-user cart lines, unique per (user, product).
///
/// The (user, product) uniqueness is structural: `upsert` merges into an
/// existing line under the write lock instead of inserting a duplicate.
#[derive(Clone, Default)]
pub struct CartStore {
    lines: Arc<RwLock<HashMap<CartLineId, CartLine>>>,
}

impl CartStore {
    /// Creates an empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a cart line by ID.
    pub async fn get(&self, line_id: CartLineId) -> Result<CartLine, CommerceError> {
        self.lines
            .read()
            .await
            .get(&line_id)
            .cloned()
            .ok_or(CommerceError::CartLineNotFound(line_id))
    }

    /// Lists a user's cart lines.
    pub async fn list_for_user(&self, user_id: UserId) -> Vec<CartLine> {
        let lines = self.lines.read().await;
        let mut mine: Vec<_> = lines
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| a.id.as_uuid().cmp(&b.id.as_uuid()));
        mine
    }

    /// Finds the user's line for a product, if one exists.
    pub async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Option<CartLine> {
        self.lines
            .read()
            .await
            .values()
            .find(|l| l.user_id == user_id && l.product_id == product_id)
            .cloned()
    }

    /// Adds quantity to the user's line for the product, creating the line
    /// when none exists. Returns the stored line.
    pub async fn upsert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> CartLine {
        let mut lines = self.lines.write().await;
        if let Some(line) = lines
            .values_mut()
            .find(|l| l.user_id == user_id && l.product_id == product_id)
        {
            line.quantity += quantity;
            return line.clone();
        }
        let line = CartLine::new(user_id, product_id, quantity);
        lines.insert(line.id, line.clone());
        line
    }

    /// Overwrites a line's quantity. Returns the updated line.
    pub async fn set_quantity(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, CommerceError> {
        let mut lines = self.lines.write().await;
        let line = lines
            .get_mut(&line_id)
            .ok_or(CommerceError::CartLineNotFound(line_id))?;
        line.quantity = quantity;
        Ok(line.clone())
    }

    /// Removes a single line.
    pub async fn remove(&self, line_id: CartLineId) -> Result<(), CommerceError> {
        self.lines
            .write()
            .await
            .remove(&line_id)
            .map(|_| ())
            .ok_or(CommerceError::CartLineNotFound(line_id))
    }

    /// Removes every line belonging to the user. Idempotent.
    pub async fn clear_for_user(&self, user_id: UserId) {
        self.lines.write().await.retain(|_, l| l.user_id != user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_creates_then_merges() {
        let store = CartStore::new();
        let user = UserId::new();
        let product = ProductId::new();

        let first = store.upsert(user, product, 2).await;
        assert_eq!(first.quantity, 2);

        let merged = store.upsert(user, product, 3).await;
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 5);
        assert_eq!(store.list_for_user(user).await.len(), 1);
    }

    #[tokio::test]
    async fn lines_are_scoped_per_user() {
        let store = CartStore::new();
        let product = ProductId::new();
        let alice = UserId::new();
        let bob = UserId::new();

        store.upsert(alice, product, 1).await;
        store.upsert(bob, product, 4).await;

        assert_eq!(store.list_for_user(alice).await[0].quantity, 1);
        assert_eq!(store.list_for_user(bob).await[0].quantity, 4);
    }

    #[tokio::test]
    async fn set_quantity_and_remove() {
        let store = CartStore::new();
        let user = UserId::new();
        let line = store.upsert(user, ProductId::new(), 1).await;

        let updated = store.set_quantity(line.id, 7).await.unwrap();
        assert_eq!(updated.quantity, 7);

        store.remove(line.id).await.unwrap();
        assert_eq!(
            store.get(line.id).await.unwrap_err(),
            CommerceError::CartLineNotFound(line.id)
        );
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = CartStore::new();
        let user = UserId::new();
        store.upsert(user, ProductId::new(), 1).await;
        store.upsert(user, ProductId::new(), 2).await;

        store.clear_for_user(user).await;
        assert!(store.list_for_user(user).await.is_empty());

        // Second clear on an already-empty cart is a no-op.
        store.clear_for_user(user).await;
        assert!(store.list_for_user(user).await.is_empty());
    }
}
