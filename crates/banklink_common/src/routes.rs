// --- File: crates/banklink_common/src/routes.rs ---

use axum::{routing::get, Router};

/// Creates a router containing the routes shared by every deployment.
///
/// # Returns
/// A router with `GET /health`.
pub fn routes() -> Router {
    Router::new().route("/health", get(|| async { "ok" }))
}
