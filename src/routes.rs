//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The overlay is a static page plus its wasm bundle, so the host only serves
//! files. `HEAD` on any page path answers the overlay's latency probe, and
//! `/healthz` exists for process supervisors.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Static site at `/` with health check, compression and request tracing.
pub fn app(site_dir: &Path) -> Router {
    let site = ServeDir::new(site_dir).append_index_html_on_directories(true);
    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(site)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
