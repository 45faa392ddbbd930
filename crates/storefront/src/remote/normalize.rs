//! Projection of remote catalog records into the canonical [`Product`] shape.
//!
//! Everything here is pure: no I/O, no clock. The HTTP client calls
//! [`normalize_product`] on every record it receives.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use velour_core::{Department, Product, ProductId};

use super::types::RemoteProduct;

/// Remote reference currency to local currency units.
const PRICE_CONVERSION_RATE: i64 = 280;

/// Ratings strictly above this mark a product as a new arrival.
const NEW_ARRIVAL_RATING: f64 = 4.5;

/// Remote categories that belong to the women's department outright.
const WOMEN_CATEGORIES: &[&str] = &["beauty", "fragrances", "skin-care"];

/// Variant tokens assigned to every remote product; the feed has none.
const REMOTE_COLORS: &[&str] = &["black", "white", "gray"];
const REMOTE_SIZES: &[&str] = &["M", "L", "XL"];

/// Normalize a remote record into a [`Product`].
#[must_use]
pub fn normalize_product(remote: RemoteProduct) -> Product {
    let category = remote.category.to_lowercase();

    let sale_price = remote
        .discount_percentage
        .filter(|discount| *discount > Decimal::ZERO)
        .map(|discount| {
            to_local_price(remote.price * (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED)
        });

    Product {
        id: ProductId::External(remote.id),
        name: remote.title,
        description: remote.description,
        price: to_local_price(remote.price),
        sale_price,
        categories: vec![classify_category(&category).as_str().to_string()],
        sub_category: sub_category_of(&category),
        colors: REMOTE_COLORS.iter().map(ToString::to_string).collect(),
        sizes: REMOTE_SIZES.iter().map(ToString::to_string).collect(),
        is_new: remote.rating.is_some_and(|rating| rating > NEW_ARRIVAL_RATING),
        image: remote.thumbnail,
        images: remote.images,
        rating: remote.rating,
        stock: remote.stock,
        brand: remote.brand,
    }
}

/// Classify a lower-cased remote category token into a department.
///
/// Gadgets (smartphones, laptops, tablets, sunglasses, watches, ...) and any
/// token not claimed by women or men fall through to accessories.
#[must_use]
pub fn classify_category(category: &str) -> Department {
    if category.contains("womens") || WOMEN_CATEGORIES.contains(&category) {
        Department::Women
    } else if category.contains("mens") || category == "tops" {
        Department::Men
    } else {
        Department::Accessories
    }
}

/// Strip the gender prefix from a lower-cased remote category token.
#[must_use]
pub fn sub_category_of(category: &str) -> String {
    category.replacen("womens-", "", 1).replacen("mens-", "", 1)
}

/// Convert a remote price to whole local currency units, rounding half away
/// from zero.
#[must_use]
pub fn to_local_price(amount: Decimal) -> i64 {
    (amount * Decimal::from(PRICE_CONVERSION_RATE))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
