//! Product route handlers.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use velour_core::Product;

use crate::error::{Result, add_breadcrumb};
use crate::products::{ProductFilter, ProductQuery};
use crate::state::AppState;

/// List products, optionally filtered and sorted.
///
/// Remote failures never fail this endpoint; the remote part of the list is
/// stale or empty instead. A repeated parameter takes its first value.
pub async fn index(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Product>>> {
    let query = ProductQuery::from_query_string(raw.as_deref().unwrap_or_default());
    let filter = ProductFilter::try_from(query)?;
    Ok(Json(state.products().list(&filter).await))
}

/// Get one product by local id or `external-<n>`.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    add_breadcrumb("catalog", "Viewed product", Some(&[("product_id", id.as_str())]));
    Ok(Json(state.products().find(&id).await?))
}

/// Related products for the product page.
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products().related(&id).await?))
}
