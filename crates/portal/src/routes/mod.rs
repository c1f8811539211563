//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET /health                      - Health check
//!
//! # Orders
//! GET /api/orders                  - Search a customer's orders (?email= or ?phone=)
//! GET /api/orders/{order_number}   - Track one order (optional ?email= ownership check)
//! ```

mod orders;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the portal router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(orders::routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the proxy.
async fn health() -> &'static str {
    "ok"
}
