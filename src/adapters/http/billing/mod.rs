//! Billing HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::BillingAppState;
pub use routes::billing_router;
