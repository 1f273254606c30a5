//! Featured items API (tenant side)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/tenants/{tenant_id}/featured-items",
        get(handler::list).put(handler::upsert),
    )
}
