//! Price bounds over effective prices.
//!
//! All prices in the catalog are whole local-currency units (`i64`). A
//! product's *effective* price is its sale price when one is set, otherwise
//! its list price; see [`crate::Product::effective_price`].

use serde::{Deserialize, Serialize};

/// Inclusive price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest accepted price, inclusive.
    pub min: Option<i64>,
    /// Highest accepted price, inclusive.
    pub max: Option<i64>,
}

impl PriceRange {
    /// Create a new price range.
    #[must_use]
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `price` lies within the bounds.
    #[must_use]
    pub fn contains(&self, price: i64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}
