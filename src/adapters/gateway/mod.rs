//! Payment gateway adapters.

mod http;
mod mock;

pub use http::HttpPaymentGateway;
pub use mock::MockPaymentGateway;
