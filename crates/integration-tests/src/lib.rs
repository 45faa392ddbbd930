//! Integration tests for Velour.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no network)
//! cargo test -p velour-integration-tests
//!
//! # Live tests against a running storefront
//! cargo run -p velour-storefront &
//! cargo test -p velour-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Full router driven through `tower::ServiceExt::oneshot`
//!   with the built-in static catalog, a stub remote and a manual clock
//! - `storefront_live` - HTTP requests against `STOREFRONT_BASE_URL`
//!
//! This module holds the shared harness for the in-process tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;
use velour_core::{Product, ProductId};
use velour_storefront::catalog::StaticCatalog;
use velour_storefront::products::ManualClock;
use velour_storefront::remote::{RemoteCatalog, RemoteCatalogError};
use velour_storefront::routes;
use velour_storefront::state::AppState;

/// In-memory remote catalog that counts calls and can be switched off.
#[derive(Default)]
pub struct StubRemote {
    feed: Vec<Product>,
    failing: AtomicBool,
    bulk_calls: AtomicUsize,
    lookups: AtomicUsize,
}

impl StubRemote {
    #[must_use]
    pub fn new(feed: Vec<Product>) -> Self {
        Self {
            feed,
            ..Self::default()
        }
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of bulk feed fetches so far.
    #[must_use]
    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    /// Number of single-record lookups so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), RemoteCatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteCatalogError::Status {
                status: 503,
                body: "stub remote is down".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCatalog for StubRemote {
    async fn fetch_products(&self) -> Result<Vec<Product>, RemoteCatalogError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.feed.clone())
    }

    async fn fetch_product(&self, remote_id: u64) -> Result<Product, RemoteCatalogError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.feed
            .iter()
            .find(|p| p.id == ProductId::External(remote_id))
            .cloned()
            .ok_or_else(|| RemoteCatalogError::NotFound(format!("products/{remote_id}")))
    }
}

/// A normalized remote product, as the real client would produce it.
#[must_use]
pub fn external_product(remote_id: u64, name: &str, department: &str, price: i64) -> Product {
    serde_json::from_value(json!({
        "id": format!("external-{remote_id}"),
        "name": name,
        "description": format!("{name} from the remote feed"),
        "price": price,
        "categories": [department],
        "subCategory": "remote",
        "colors": ["black", "white", "gray"],
        "sizes": ["M", "L", "XL"],
        "isNew": false,
        "image": format!("https://cdn.example.com/{remote_id}.png"),
        "images": []
    }))
    .unwrap()
}

/// The default three-product remote feed.
#[must_use]
pub fn default_feed() -> Vec<Product> {
    let mut phone = external_product(1, "Remote Phone", "accessories", 28000);
    phone.sale_price = Some(25200);
    phone.is_new = true;

    vec![
        phone,
        external_product(2, "Remote Shirt", "men", 8397),
        external_product(3, "Remote Dress", "women", 15000),
    ]
}

/// The storefront router wired to the built-in catalog, a stub remote and a
/// manual clock.
pub struct TestApp {
    pub router: Router,
    pub remote: Arc<StubRemote>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    #[must_use]
    pub fn new(feed: Vec<Product>) -> Self {
        let remote = Arc::new(StubRemote::new(feed));
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::from_parts(
            StaticCatalog::builtin().unwrap(),
            remote.clone(),
            clock.clone(),
        );

        Self {
            router: routes::router(state),
            remote,
            clock,
        }
    }

    /// Send a GET request and return status, headers and raw body.
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.get_raw(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new(default_feed())
    }
}

/// Product ids from a JSON array, rendered the way the API writes them.
#[must_use]
pub fn ids(products: &Value) -> Vec<String> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| match &p["id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
