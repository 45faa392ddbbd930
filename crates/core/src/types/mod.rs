//! Core types for Velour.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod wishlist;

pub use cart::{Cart, CartItem};
pub use category::{Category, Department, SubCategory};
pub use id::{EXTERNAL_ID_PREFIX, ProductId, ProductIdError};
pub use price::PriceRange;
pub use product::Product;
pub use wishlist::Wishlist;
