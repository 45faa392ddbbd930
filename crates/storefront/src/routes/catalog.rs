//! Static catalog enumerations.

use axum::{Json, extract::State};
use serde::Serialize;
use velour_core::Category;

use crate::state::AppState;

/// Valid filter tokens.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

/// The static category tree, verbatim.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().to_vec())
}

/// Color and size tokens accepted by the product filters.
pub async fn filters(State(state): State<AppState>) -> Json<FilterOptions> {
    let catalog = state.catalog();
    Json(FilterOptions {
        colors: catalog.colors().to_vec(),
        sizes: catalog.sizes().to_vec(),
    })
}
