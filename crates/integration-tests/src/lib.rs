//! Integration tests for the Bazaar storefront.
//!
//! The tests drive the full router in process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```

use axum::Router;
use bazaar_storefront::{
    catalog::Catalog, config::StorefrontConfig, routes, state::AppState,
};

/// Static assets of the storefront crate, relative to this crate.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// Configuration with defaults and the storefront's static directory.
///
/// # Panics
///
/// Panics if the default configuration does not parse.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_STATIC_DIR" => Some(STATIC_DIR.to_string()),
        _ => None,
    })
    .expect("default configuration")
}

/// Build the storefront router over the builtin catalog.
#[must_use]
pub fn test_app() -> Router {
    test_app_with(Catalog::default())
}

/// Build the storefront router over a given catalog.
#[must_use]
pub fn test_app_with(catalog: Catalog) -> Router {
    routes::router(AppState::new(test_config(), catalog))
}
