//! Velour Core - Shared types library.
//!
//! This crate provides the domain types used across all Velour components:
//! - `storefront` - Product API (aggregation, filtering, lookup)
//! - `cli` - Command-line access to the same catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no clocks. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, products, categories, price ranges,
//!   cart and wishlist containers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
