//! In-memory wishlist keyed by product id.

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// A set of saved products, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Add a product unless one with the same id is already saved.
    pub fn add(&mut self, product: &Product) {
        if !self.contains(product.id) {
            self.items.push(product.clone());
        }
    }

    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Add the product if absent, remove it if present. Returns `true` if the
    /// product is saved afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.items.push(product.clone());
            true
        }
    }
}
