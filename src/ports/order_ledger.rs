//! Port for the local order ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BillingError, Order};

/// Persistence for payment-intent orders, keyed by gateway order id.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Stores a newly created order.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the write fails.
    async fn create(&self, order: Order) -> Result<(), BillingError>;

    /// Looks up an order by its gateway order id.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` if the read fails. An absent order is
    /// `Ok(None)`, not an error.
    async fn find(&self, order_id: &str) -> Result<Option<Order>, BillingError>;

    /// Transitions an order to paid, recording the payment id.
    ///
    /// Implementations must merge, not replace: re-applying to an
    /// already-paid order is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::OrderNotFound` if no such order exists, or
    /// `BillingError::Storage` if the write fails.
    async fn mark_paid(
        &self,
        order_id: &str,
        payment_id: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<(), BillingError>;
}
