//! Product service: aggregation, filtering, lookup and related products.
//!
//! # Architecture
//!
//! - The static catalog is loaded once and never changes
//! - The remote feed goes through [`CatalogCache`]
//! - Listings chain the two sources at query time (local first) and run the
//!   result through a [`ProductFilter`]
//! - Lookups of `external-` ids always go to the remote live, bypassing the
//!   cache

pub mod cache;
pub mod filter;

pub use cache::{CATALOG_CACHE_TTL, CatalogCache, Clock, ManualClock, SystemClock};
pub use filter::{ProductFilter, ProductQuery, QueryError, SortOrder};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument, warn};
use velour_core::{Product, ProductId};

use crate::catalog::StaticCatalog;
use crate::remote::{RemoteCatalog, RemoteCatalogError};

/// Maximum number of related products returned for one product.
pub const RELATED_LIMIT: usize = 4;

/// Failed product lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Product not found")]
    NotFound,

    #[error("External product not found")]
    ExternalNotFound,
}

/// Read access to the combined local and remote catalog.
pub struct ProductService {
    catalog: Arc<StaticCatalog>,
    remote: Arc<dyn RemoteCatalog>,
    cache: CatalogCache,
}

impl ProductService {
    /// Create a service over a static catalog and a remote source.
    #[must_use]
    pub fn new(
        catalog: Arc<StaticCatalog>,
        remote: Arc<dyn RemoteCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = CatalogCache::new(Arc::clone(&remote), clock);
        Self {
            catalog,
            remote,
            cache,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Every product: local catalog first, then the remote snapshot in feed
    /// order. No de-duplication; ids from the two sources never collide.
    pub async fn all(&self) -> Vec<Product> {
        let external = self.cache.get().await;
        self.catalog
            .products()
            .iter()
            .chain(external.iter())
            .cloned()
            .collect()
    }

    /// Aggregated products that pass `filter`, in the order it asks for.
    pub async fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let external = self.cache.get().await;
        filter.apply(self.catalog.products().iter().chain(external.iter()))
    }

    /// Resolve a raw path identifier to a product.
    ///
    /// `external-<n>` is fetched from the remote by `n`; anything else must be
    /// a local integer id.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::ExternalNotFound` if the remote lookup fails for
    /// any reason, `LookupError::NotFound` if no local product matches.
    #[instrument(skip(self))]
    pub async fn find(&self, raw_id: &str) -> Result<Product, LookupError> {
        if ProductId::has_external_marker(raw_id) {
            let Ok(ProductId::External(remote_id)) = raw_id.parse() else {
                debug!("Malformed external product id");
                return Err(LookupError::ExternalNotFound);
            };

            return self
                .remote
                .fetch_product(remote_id)
                .await
                .map_err(|e| {
                    match &e {
                        RemoteCatalogError::NotFound(_) => {
                            debug!(remote_id, "External product does not exist");
                        }
                        _ => warn!(remote_id, error = %e, "External product lookup failed"),
                    }
                    LookupError::ExternalNotFound
                });
        }

        match raw_id.parse() {
            Ok(ProductId::Local(id)) => self.catalog.find(id).cloned().ok_or(LookupError::NotFound),
            _ => Err(LookupError::NotFound),
        }
    }

    /// Up to [`RELATED_LIMIT`] other products sharing a category with the one
    /// identified by `raw_id`, in aggregator order.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::find`].
    pub async fn related(&self, raw_id: &str) -> Result<Vec<Product>, LookupError> {
        let product = self.find(raw_id).await?;
        let external = self.cache.get().await;

        Ok(self
            .catalog
            .products()
            .iter()
            .chain(external.iter())
            .filter(|other| other.id != product.id && other.shares_category_with(&product))
            .take(RELATED_LIMIT)
            .cloned()
            .collect())
    }
}
