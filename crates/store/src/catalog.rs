//! Product catalog and the authoritative stock ledger.

use std::collections::HashMap;
use std::sync::Arc;

use common::ProductId;
use domain::{CommerceError, Product};
use tokio::sync::RwLock;

/// Product records plus the stock ledger.
///
/// Stock changes go through [`try_reserve`](Catalog::try_reserve) and
/// [`release`](Catalog::release), both of which take the write lock, so a
/// decrement can never observe stale stock: the check and the subtraction
/// happen under the same guard.
#[derive(Clone, Default)]
pub struct Catalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product record.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    /// Loads a product by ID.
    pub async fn get(&self, product_id: ProductId) -> Result<Product, CommerceError> {
        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(CommerceError::ProductNotFound(product_id))
    }

    /// Lists all products, sorted by name.
    pub async fn list(&self) -> Vec<Product> {
        let products = self.products.read().await;
        let mut all: Vec<_> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Lists products with stock remaining, sorted by name.
    pub async fn list_available(&self) -> Vec<Product> {
        let products = self.products.read().await;
        let mut available: Vec<_> = products.values().filter(|p| p.stock > 0).cloned().collect();
        available.sort_by(|a, b| a.name.cmp(&b.name));
        available
    }

    /// Case-insensitive substring search on the product name.
    pub async fn search(&self, name: &str) -> Vec<Product> {
        let needle = name.to_lowercase();
        let products = self.products.read().await;
        let mut matches: Vec<_> = products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    /// Replaces the stored fields of an existing product.
    pub async fn update(&self, product: Product) -> Result<Product, CommerceError> {
        let mut products = self.products.write().await;
        let entry = products
            .get_mut(&product.id)
            .ok_or(CommerceError::ProductNotFound(product.id))?;
        *entry = product.clone();
        Ok(product)
    }

    /// Removes a product record.
    pub async fn remove(&self, product_id: ProductId) -> Result<(), CommerceError> {
        self.products
            .write()
            .await
            .remove(&product_id)
            .map(|_| ())
            .ok_or(CommerceError::ProductNotFound(product_id))
    }

    /// Overwrites a product's stock level.
    pub async fn set_stock(&self, product_id: ProductId, stock: u32) -> Result<(), CommerceError> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        product.stock = stock;
        Ok(())
    }

    /// Checks that every (product, quantity) pair is satisfiable under the
    /// current stock state, without mutating anything.
    ///
    /// All lines are checked under one read guard, so the answer reflects
    /// a single consistent snapshot.
    pub async fn check_stock(&self, wanted: &[(ProductId, u32)]) -> Result<(), CommerceError> {
        let products = self.products.read().await;
        for &(product_id, quantity) in wanted {
            let product = products
                .get(&product_id)
                .ok_or(CommerceError::ProductNotFound(product_id))?;
            if product.stock < quantity {
                return Err(CommerceError::InsufficientStock {
                    product: product.name.clone(),
                    requested: quantity,
                    available: product.stock,
                });
            }
        }
        Ok(())
    }

    /// Atomically reserves stock: re-checks availability and decrements
    /// under the write lock, failing without mutation when stock is short.
    ///
    /// Returns the product as it was at the moment of the decrement, which
    /// is the snapshot checkout copies into the order line.
    pub async fn try_reserve(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Product, CommerceError> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        if product.stock < quantity {
            return Err(CommerceError::InsufficientStock {
                product: product.name.clone(),
                requested: quantity,
                available: product.stock,
            });
        }
        product.stock -= quantity;
        Ok(product.clone())
    }

    /// Returns previously reserved units to stock.
    ///
    /// Only used to roll back reservations made earlier in the same
    /// checkout attempt. A product deleted mid-flight is ignored; there is
    /// nothing left to return the stock to.
    pub async fn release(&self, product_id: ProductId, quantity: u32) {
        let mut products = self.products.write().await;
        if let Some(product) = products.get_mut(&product_id) {
            product.stock = product.stock.saturating_add(quantity);
        }
    }
}
