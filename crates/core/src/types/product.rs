//! The canonical product shape shared by the local and remote catalogs.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product as served by the storefront API.
///
/// Serialized as camelCase JSON. `salePrice` is omitted when no discount
/// applies; `colors` and `sizes` default to empty when missing from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// List price in local currency units.
    pub price: i64,
    /// Discounted price, present only when a discount applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<i64>,
    /// Lowercase category tags.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Lowercase sub-category tag.
    #[serde(default)]
    pub sub_category: String,
    /// Lowercase color tokens.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Size tokens, matched case-sensitively.
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Product {
    /// The price a customer actually pays: the sale price if set, otherwise
    /// the list price.
    #[must_use]
    pub fn effective_price(&self) -> i64 {
        self.sale_price.unwrap_or(self.price)
    }

    /// Returns `true` if the product is tagged with `category`.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Returns `true` if the product shares at least one category with `other`.
    #[must_use]
    pub fn shares_category_with(&self, other: &Self) -> bool {
        self.categories.iter().any(|c| other.in_category(c))
    }
}
