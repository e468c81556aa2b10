//! Port for the append-only webhook audit log.

use async_trait::async_trait;

use crate::domain::{BillingError, WebhookEvent};

/// Append-only log of received webhook callbacks.
///
/// Rows are never updated or deduplicated; duplicate deliveries produce
/// duplicate rows by design of the audit trail.
#[async_trait]
pub trait WebhookEventLog: Send + Sync {
    /// Appends one audit row.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the write fails.
    async fn append(&self, event: WebhookEvent) -> Result<(), BillingError>;
}
