//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route; `main.rs` only)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (recorded on the span opened by `TraceLayer`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
