//! Public order page API (no authentication)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/public/calculator/submit", post(handler::submit))
        .nest("/api/public/{tenant_id}", tenant_routes())
}

fn tenant_routes() -> Router<ServerState> {
    Router::new()
        .route("/catalog", get(handler::catalog))
        .route("/calculator/quote", post(handler::quote))
        .route("/featured-items", get(handler::featured_items))
}
