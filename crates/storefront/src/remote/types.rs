//! Wire types for the remote catalog (DummyJSON-shaped product feed).

use rust_decimal::Decimal;
use serde::Deserialize;

/// One page of the bulk product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProductPage {
    pub products: Vec<RemoteProduct>,
    #[serde(default)]
    pub total: u64,
}

/// A product record as returned by the remote catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Price in the remote reference currency.
    pub price: Decimal,
    /// Discount in percent (e.g., `7.17`).
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    /// Quality rating, 0-5.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}
