//! HTTP client for the DummyJSON-shaped remote catalog.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use velour_core::Product;

use super::types::{RemoteProduct, RemoteProductPage};
use super::{RemoteCatalog, RemoteCatalogError, normalize_product};
use crate::config::RemoteCatalogConfig;

/// Maximum number of response body characters kept in errors and logs.
const BODY_EXCERPT_LEN: usize = 200;

/// Client for the remote product feed.
#[derive(Clone)]
pub struct DummyJsonClient {
    inner: Arc<DummyJsonClientInner>,
}

struct DummyJsonClientInner {
    client: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl DummyJsonClient {
    /// Create a new remote catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &RemoteCatalogConfig) -> Result<Self, RemoteCatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(DummyJsonClientInner {
                client,
                base_url: config.base_url.clone(),
                page_size: config.page_size,
            }),
        })
    }

    /// URL of the bulk listing, e.g. `https://dummyjson.com/products?limit=100`.
    fn products_url(&self) -> Result<Url, RemoteCatalogError> {
        let mut url = self.inner.base_url.join("products")?;
        url.query_pairs_mut()
            .append_pair("limit", &self.inner.page_size.to_string());
        Ok(url)
    }

    /// URL of a single record, e.g. `https://dummyjson.com/products/30`.
    fn product_url(&self, remote_id: u64) -> Result<Url, RemoteCatalogError> {
        Ok(self.inner.base_url.join(&format!("products/{remote_id}"))?)
    }

    /// GET a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteCatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteCatalogError::NotFound(url.path().to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt = body.chars().take(BODY_EXCERPT_LEN).collect::<String>();
            tracing::error!(
                status = %status,
                url = %url,
                body = %excerpt,
                "Remote catalog returned non-success status"
            );
            return Err(RemoteCatalogError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(BODY_EXCERPT_LEN).collect::<String>(),
                "Failed to parse remote catalog response"
            );
            RemoteCatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl RemoteCatalog for DummyJsonClient {
    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteCatalogError> {
        let page: RemoteProductPage = self.get_json(self.products_url()?).await?;
        debug!(
            count = page.products.len(),
            total = page.total,
            "Fetched remote product page"
        );

        Ok(page.products.into_iter().map(normalize_product).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_product(&self, remote_id: u64) -> Result<Product, RemoteCatalogError> {
        let product: RemoteProduct = self.get_json(self.product_url(remote_id)?).await?;
        Ok(normalize_product(product))
    }
}
