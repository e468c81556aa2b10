//! Port for the de-duplicated payment record store.

use async_trait::async_trait;

use crate::domain::{BillingError, PaymentRecord};

/// Outcome of an atomic create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// The record was written; this caller won the race.
    Inserted,
    /// A record with this payment id already exists; nothing was written.
    AlreadyExists,
}

/// Persistence for confirmed payments, keyed by gateway payment id.
///
/// This store is the single de-duplication point for the engine. Both the
/// verify path and the webhook path funnel through `create_if_absent`, so
/// concurrent confirmations of the same payment resolve to exactly one
/// record.
#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    /// Atomically inserts the record unless one already exists for its
    /// payment id.
    ///
    /// Implementations must make the existence check and the insert a single
    /// atomic step; check-then-write races are exactly what this port exists
    /// to prevent.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the write fails.
    async fn create_if_absent(&self, record: PaymentRecord) -> Result<SaveResult, BillingError>;

    /// Looks up a record by gateway payment id.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the read fails.
    async fn find(&self, payment_id: &str) -> Result<Option<PaymentRecord>, BillingError>;
}
