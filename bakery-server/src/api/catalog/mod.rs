//! Tenant pricing settings API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/tenants/{tenant_id}/catalog | GET | resolved catalog, disabled entries included |
//! | /api/tenants/{tenant_id}/catalog/override | GET, PUT | the raw override document |
//! | /api/tenants/{tenant_id}/catalog/{category}/entries | PUT | add or replace an entry |
//! | /api/tenants/{tenant_id}/catalog/{category}/entries/{id}/enabled | PUT | switch on/off |
//! | /api/tenants/{tenant_id}/catalog/{category}/entries/{id} | DELETE | remove a custom entry |

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tenants/{tenant_id}/catalog", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::resolved))
        .route(
            "/override",
            get(handler::get_override).put(handler::replace_override),
        )
        .route("/{category}/entries", put(handler::upsert))
        .route("/{category}/entries/{id}/enabled", put(handler::set_enabled))
        .route("/{category}/entries/{id}", delete(handler::remove))
}
