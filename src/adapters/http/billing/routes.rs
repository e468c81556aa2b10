//! Route tables for the billing API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, BillingAppState};

/// Client-facing billing routes.
fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/verify", post(handlers::verify_payment))
        .route("/subscription/:user_id", get(handlers::get_subscription))
}

/// Gateway-facing webhook routes.
fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/gateway", post(handlers::gateway_webhook))
}

/// The full billing router, mounted by the binary under `/api`.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .nest("/billing", billing_routes())
        .nest("/webhooks", webhook_routes())
}
