//! Remote catalog adapter.
//!
//! # Architecture
//!
//! - [`RemoteCatalog`] is the seam the product service depends on; the
//!   production implementation is [`DummyJsonClient`], tests substitute stubs
//! - The client fetches a fixed-size page of the remote feed (or a single
//!   record by id) and hands every record to [`normalize_product`]
//! - No retries and no caching here; the bulk listing is cached one layer up
//!   in [`crate::products::CatalogCache`], single-record lookups are not
//!   cached at all
//!
//! # Example
//!
//! ```rust,ignore
//! use velour_storefront::remote::{DummyJsonClient, RemoteCatalog};
//!
//! let client = DummyJsonClient::new(&config.remote)?;
//! let products = client.fetch_products().await?;
//! let product = client.fetch_product(30).await?;
//! ```

mod client;
pub mod normalize;
pub mod types;

pub use client::DummyJsonClient;
pub use normalize::normalize_product;

use async_trait::async_trait;
use thiserror::Error;
use velour_core::Product;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteCatalogError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote returned a non-success status.
    #[error("Remote catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Source of normalized products from the remote catalog.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch the bulk product feed, normalized, in remote response order.
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteCatalogError>;

    /// Fetch and normalize a single record by its remote numeric id.
    async fn fetch_product(&self, remote_id: u64) -> Result<Product, RemoteCatalogError>;
}
