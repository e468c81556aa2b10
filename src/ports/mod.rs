//! Port traits: the seams between application logic and infrastructure.
//!
//! Every port is object-safe so handlers can hold `Arc<dyn Port>` and tests
//! can substitute in-memory or mock implementations.

pub mod gateway;
pub mod order_ledger;
pub mod payment_records;
pub mod tenants;
pub mod webhook_log;

pub use gateway::{
    CreateGatewayOrder, GatewayOrder, GatewayOrderMeta, GatewayOrderNotes, PaymentGateway,
};
pub use order_ledger::OrderLedger;
pub use payment_records::{PaymentRecordStore, SaveResult};
pub use tenants::TenantStore;
pub use webhook_log::WebhookEventLog;
