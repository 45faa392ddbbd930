//! Velour storefront library.
//!
//! Serves a product catalog that merges a static local catalog with a cached
//! remote feed, behind a small JSON API. The binary in `main.rs` wires this up
//! with Sentry and a tracing subscriber; the CLI and the integration tests use
//! the library directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod products;
pub mod remote;
pub mod routes;
pub mod state;
