//! In-memory adapters backed by `Mutex<HashMap>`.
//!
//! Used in tests and for local development. Each adapter supports failure
//! injection so callers' retry and degradation paths can be exercised.

mod order_ledger;
mod payment_records;
mod tenants;
mod webhook_log;

pub use order_ledger::InMemoryOrderLedger;
pub use payment_records::InMemoryPaymentRecordStore;
pub use tenants::InMemoryTenantStore;
pub use webhook_log::InMemoryWebhookEventLog;
