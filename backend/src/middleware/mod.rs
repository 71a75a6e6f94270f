//! General-purpose middleware for the API.
//!
//! Transport-level layers applied to the whole router: CORS for the browser
//! frontend, a request body cap, and per-request tracing spans.

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (64 KiB).
pub const MAX_BODY_SIZE: usize = 64 * 1024;

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Wraps `router` with the shared transport layers.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}
