//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (starts a page load)
//! GET  /health                 - Health check
//! GET  /static/*               - Static assets
//!
//! # Events (HTMX, require x-page-id)
//! POST /events/add             - Add product to cart
//! POST /events/rent            - Rent product
//! POST /events/navigate        - Switch section
//! POST /events/checkout        - Place order
//! POST /events/cart/open       - Open cart panel
//! POST /events/cart/close      - Close cart panel
//! POST /events/menu/toggle     - Toggle mobile menu
//! ```

pub mod events;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the event routes router.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(events::add))
        .route("/rent", post(events::rent))
        .route("/navigate", post(events::navigate))
        .route("/checkout", post(events::checkout))
        .route("/cart/open", post(events::open_cart))
        .route("/cart/close", post(events::close_cart))
        .route("/menu/toggle", post(events::toggle_menu))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/events", event_routes())
}

/// Build the complete application router, minus the Sentry layers.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    routes()
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
