//! Catalog inspection commands.
//!
//! Each command prints pretty JSON to stdout, in the same shape the
//! storefront API returns.
//!
//! # Environment Variables
//!
//! Read through `StorefrontConfig::from_env`:
//!
//! - `STOREFRONT_CATALOG_PATH` - Replacement static catalog file
//! - `REMOTE_CATALOG_URL` - Remote catalog base URL
//! - `REMOTE_CATALOG_PAGE_SIZE` - Products per bulk request
//! - `REMOTE_CATALOG_TIMEOUT_SECS` - Remote request timeout

use serde::Serialize;
use tracing::info;

use velour_storefront::catalog::StaticCatalog;
use velour_storefront::config::StorefrontConfig;
use velour_storefront::products::{ProductFilter, ProductQuery};
use velour_storefront::remote::{DummyJsonClient, RemoteCatalog};
use velour_storefront::state::AppState;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn load_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(AppState::new(&config)?)
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// List aggregated products matching the filter flags.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a flag value is malformed.
pub async fn products(query: ProductQuery) -> CommandResult {
    let filter = ProductFilter::try_from(query)?;
    let state = load_state()?;

    let products = state.products().list(&filter).await;
    info!(count = products.len(), "Listed products");
    print_json(&products)
}

/// Show one product.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the product is not found.
pub async fn product(id: &str) -> CommandResult {
    let state = load_state()?;
    let product = state.products().find(id).await?;
    print_json(&product)
}

/// Show products related to one product.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the product is not found.
pub async fn related(id: &str) -> CommandResult {
    let state = load_state()?;
    let related = state.products().related(id).await?;
    print_json(&related)
}

/// Print the static category tree.
///
/// Only the static catalog is loaded; the remote is never contacted.
///
/// # Errors
///
/// Returns an error if the configured catalog file cannot be loaded.
pub fn categories() -> CommandResult {
    let config = StorefrontConfig::from_env()?;
    let catalog = StaticCatalog::load(config.catalog_path.as_deref())?;
    print_json(catalog.categories())
}

/// Fetch the remote feed directly, bypassing the cache.
///
/// Unlike the listing endpoint, a remote failure is reported as an error.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the remote request fails.
pub async fn external() -> CommandResult {
    let config = StorefrontConfig::from_env()?;
    info!(remote = %config.remote.base_url, "Fetching remote catalog");

    let client = DummyJsonClient::new(&config.remote)?;
    let products = client.fetch_products().await?;
    print_json(&products)
}
