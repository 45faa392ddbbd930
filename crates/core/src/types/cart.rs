//! In-memory shopping cart.
//!
//! Lines are keyed by product id plus the selected size and color, so the
//! same product in two sizes occupies two lines. The container holds no
//! persistence of its own; callers decide where (and whether) to store it.

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// One cart line: a product snapshot with its chosen variant and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

impl CartItem {
    fn matches(&self, id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product.id == id
            && self.selected_size.as_deref() == size
            && self.selected_color.as_deref() == color
    }

    /// Effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.product.effective_price() * i64::from(self.quantity)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add `quantity` of a product variant. Merges into an existing line with
    /// the same product, size and color.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product.id, size, color))
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity,
            selected_size: size.map(String::from),
            selected_color: color.map(String::from),
        });
    }

    /// Remove the line for a product variant, if present.
    pub fn remove(&mut self, id: ProductId, size: Option<&str>, color: Option<&str>) {
        self.items.retain(|item| !item.matches(id, size, color));
    }

    /// Set the quantity of a line. Quantities below 1 are ignored; use
    /// [`Cart::remove`] to drop a line.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) {
        if quantity < 1 {
            return;
        }
        for item in self.items.iter_mut().filter(|i| i.matches(id, size, color)) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of effective price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
