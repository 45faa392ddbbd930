//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{CatalogError, StaticCatalog};
use crate::config::StorefrontConfig;
use crate::products::{Clock, ProductService, SystemClock};
use crate::remote::{DummyJsonClient, RemoteCatalog, RemoteCatalogError};

/// Error building the application state at startup.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("remote catalog client: {0}")]
    Remote(#[from] RemoteCatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns the product service,
/// including its catalog cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    products: ProductService,
}

impl AppState {
    /// Create the production state: static catalog from the configured file
    /// (or the built-in one), the HTTP remote client and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails to load or the HTTP client
    /// cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StateError> {
        let catalog = StaticCatalog::load(config.catalog_path.as_deref())?;
        let remote = DummyJsonClient::new(&config.remote)?;

        Ok(Self::from_parts(
            catalog,
            Arc::new(remote),
            Arc::new(SystemClock),
        ))
    }

    /// Assemble state from explicit parts.
    #[must_use]
    pub fn from_parts(
        catalog: StaticCatalog,
        remote: Arc<dyn RemoteCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                products: ProductService::new(Arc::new(catalog), remote, clock),
            }),
        }
    }

    /// Get a reference to the product service.
    #[must_use]
    pub fn products(&self) -> &ProductService {
        &self.inner.products
    }

    /// Get a reference to the static catalog.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        self.inner.products.catalog()
    }
}
