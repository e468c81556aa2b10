//! The shared reconciliation core both confirmation channels funnel into.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{BillingError, Order, PaymentRecord, PaymentRecordStatus};
use crate::ports::{OrderLedger, PaymentRecordStore, SaveResult};

use super::subscription_manager::SubscriptionManager;

/// Result of reconciling one payment confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// True if this confirmation was the first to record the payment.
    /// False means a duplicate delivery or the losing side of a race.
    pub newly_recorded: bool,
}

/// Applies a confirmed payment: records it, marks the order paid, and
/// activates the subscription.
///
/// Every step is idempotent, so the sequence is safe to replay from either
/// confirmation channel, concurrently or after a partial failure.
pub struct PaymentReconciler {
    payments: Arc<dyn PaymentRecordStore>,
    ledger: Arc<dyn OrderLedger>,
    subscriptions: SubscriptionManager,
}

impl PaymentReconciler {
    pub fn new(
        payments: Arc<dyn PaymentRecordStore>,
        ledger: Arc<dyn OrderLedger>,
        subscriptions: SubscriptionManager,
    ) -> Self {
        Self {
            payments,
            ledger,
            subscriptions,
        }
    }

    /// Reconciles one confirmed payment against its ledger order.
    ///
    /// The payment record write is the de-duplication point; the order
    /// update and subscription activation run regardless of which channel
    /// won, so a crash between steps heals on the next delivery.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Storage` on persistence failures,
    /// `BillingError::OrderNotFound` if the ledger row vanished, or
    /// `BillingError::InvalidPlan` for an unknown plan id.
    pub async fn reconcile(
        &self,
        order: &Order,
        payment_id: &str,
        signature: &str,
        status: PaymentRecordStatus,
        now: DateTime<Utc>,
    ) -> Result<Reconciliation, BillingError> {
        let record = PaymentRecord::from_order(order, payment_id, signature, status, now);
        let save = self.payments.create_if_absent(record).await?;

        match save {
            SaveResult::Inserted => {
                info!(payment_id, order_id = %order.order_id, "payment recorded");
            }
            SaveResult::AlreadyExists => {
                debug!(payment_id, "payment already recorded, replaying side effects");
            }
        }

        self.ledger.mark_paid(&order.order_id, payment_id, now).await?;
        self.subscriptions.reconcile(order, now).await?;

        Ok(Reconciliation {
            newly_recorded: save == SaveResult::Inserted,
        })
    }
}
