//! API routes
//!
//! - [`health`] - liveness
//! - [`public`] - public order page: catalog, live quote, featured items, submit
//! - [`catalog`] - tenant pricing settings (override document)
//! - [`featured_items`] - tenant featured items
//! - [`leads`] - submitted leads and quote drafts

pub mod catalog;
pub mod featured_items;
pub mod health;
pub mod leads;
pub mod public;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};

/// HTTP request logging middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

/// Build the router with all routes and layers, bound to `state`
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(public::router())
        .merge(catalog::router())
        .merge(featured_items::router())
        .merge(leads::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
