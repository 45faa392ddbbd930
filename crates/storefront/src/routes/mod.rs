//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check ("ok")
//!
//! # Products
//! GET  /api/products                - Filtered product list (local + remote)
//! GET  /api/products/{id}           - One product by local id or external-<n>
//! GET  /api/products/{id}/related   - Up to 4 products sharing a category
//!
//! # Catalog enumerations
//! GET  /api/categories              - Static category tree
//! GET  /api/filters                 - Valid color and size tokens
//! ```

pub mod catalog;
pub mod products;

use axum::{Router, extract::Request, middleware, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/products/{id}/related", get(products::related))
        .route("/categories", get(catalog::categories))
        .route("/filters", get(catalog::filters))
}

/// Build the full application router with tracing and request IDs.
///
/// Sentry layers are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the remote catalog.
pub async fn health() -> &'static str {
    "ok"
}

async fn not_found(request: Request) -> AppError {
    AppError::NotFound(request.uri().path().to_string())
}
