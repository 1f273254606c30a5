//! Bakery Server - order pricing and lead capture for multi-tenant bakeries
//!
//! # Architecture
//!
//! - **Catalog** (`catalog`): platform defaults merged with per-tenant overrides
//! - **Pricing** (`pricing`): line prices and order totals on `rust_decimal`
//! - **Submission** (`submission`): validated, frozen lead payloads
//! - **Quote** (`quote`): editable quote lines rebuilt from a lead
//! - **Storage** (`storage`): embedded redb database
//! - **HTTP API** (`api`): axum routes for the public page and tenant settings
//!
//! # Module layout
//!
//! ```text
//! bakery-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── catalog/       # defaults, resolver, editor
//! ├── pricing/       # line pricer, totalizer, money helpers
//! ├── submission/    # payload builder and validation errors
//! ├── quote/         # quote drafts
//! ├── storage/       # redb tables
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod pricing;
pub mod quote;
pub mod storage;
pub mod submission;
pub mod utils;

// Re-export public types
pub use catalog::ResolvedCatalog;
pub use core::{Config, Server, ServerState};
pub use storage::BakeryStorage;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize logging from the environment
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____        __
   / __ )____ _/ /_____  _______  __
  / __  / __ `/ //_/ _ \/ ___/ / / /
 / /_/ / /_/ / ,< /  __/ /  / /_/ /
/_____/\__,_/_/|_|\___/_/   \__, /
                           /____/
    "#
    );
}
