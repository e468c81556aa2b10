//! Gateway webhook ingestion.

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

use crate::domain::signature::verify_webhook_signature;
use crate::domain::{BillingError, GatewayWebhook, PaymentRecordStatus, WebhookEvent};
use crate::ports::{OrderLedger, PaymentGateway, WebhookEventLog};

use super::reconciler::PaymentReconciler;

/// Bounded retries for datastore faults on the webhook path. After the last
/// attempt the fault is logged and the delivery acknowledged; the gateway's
/// redelivery schedule is not a substitute for our own retries.
const STORAGE_RETRY_ATTEMPTS: u32 = 3;

/// A raw webhook delivery.
#[derive(Debug, Clone)]
pub struct IngestWebhookCommand {
    /// The exact request body bytes the signature was computed over.
    pub payload: Vec<u8>,
    pub signature: String,
}

/// How a verified delivery was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A payment confirmation was reconciled.
    Processed,
    /// The delivery was accepted but carried no work, or its side effects
    /// failed after bounded retries and were deliberately swallowed.
    Acknowledged,
    /// The order belongs to a different product line on the shared gateway
    /// account. Ignored without an audit row.
    ForeignApplication,
    /// A confirmation for an order this service never created. Logged for
    /// audit, acknowledged, nothing mutated.
    UnknownOrder,
}

/// Verifies, filters, audits, and reconciles gateway webhook deliveries.
pub struct IngestWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
    webhook_log: Arc<dyn WebhookEventLog>,
    ledger: Arc<dyn OrderLedger>,
    reconciler: Arc<PaymentReconciler>,
    application_tag: String,
    webhook_secret: SecretString,
}

impl IngestWebhookHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        webhook_log: Arc<dyn WebhookEventLog>,
        ledger: Arc<dyn OrderLedger>,
        reconciler: Arc<PaymentReconciler>,
        application_tag: impl Into<String>,
        webhook_secret: SecretString,
    ) -> Self {
        Self {
            gateway,
            webhook_log,
            ledger,
            reconciler,
            application_tag: application_tag.into(),
            webhook_secret,
        }
    }

    /// Handles one delivery.
    ///
    /// Signature verification comes first, over the exact raw body. The
    /// ownership check follows, before any persistence, so callbacks for
    /// other product lines leave no trace here. After that point failures
    /// are swallowed rather than surfaced: returning an error would make
    /// the gateway redeliver, and every side effect is idempotent anyway.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidSignature` for a bad signature,
    /// `BillingError::MalformedWebhook` for an unparseable body, and
    /// `BillingError::GatewayUnavailable` when ownership cannot be
    /// established. Ownership is the one lookup that fails closed.
    pub async fn handle(
        &self,
        command: IngestWebhookCommand,
    ) -> Result<WebhookOutcome, BillingError> {
        let valid = verify_webhook_signature(
            &command.payload,
            &command.signature,
            self.webhook_secret.expose_secret(),
        );
        if !valid {
            warn!("webhook signature rejected");
            return Err(BillingError::InvalidSignature);
        }

        let hook = GatewayWebhook::parse(&command.payload)?;
        let order_id = hook.payment.order_id.clone();
        let payment_id = hook.payment.id.clone();

        let meta = self.gateway.fetch_order(&order_id).await?;
        if meta.application_tag.as_deref() != Some(self.application_tag.as_str()) {
            debug!(order_id, "ignoring webhook for foreign application");
            return Ok(WebhookOutcome::ForeignApplication);
        }

        let now = Utc::now();
        self.append_audit_row(WebhookEvent::from_gateway(&hook, &self.application_tag, now))
            .await;

        if !hook.is_payment_confirmation() {
            debug!(event = %hook.event, "webhook acknowledged without processing");
            return Ok(WebhookOutcome::Acknowledged);
        }

        let order = match self.ledger.find(&order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!(order_id, payment_id, "webhook for unknown order");
                return Ok(WebhookOutcome::UnknownOrder);
            }
            Err(e) => {
                error!(error = %e, order_id, "order lookup failed during webhook processing");
                return Ok(WebhookOutcome::Acknowledged);
            }
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .reconciler
                .reconcile(
                    &order,
                    &payment_id,
                    &command.signature,
                    PaymentRecordStatus::WebhookConfirmed,
                    now,
                )
                .await
            {
                Ok(result) => {
                    info!(
                        order_id,
                        payment_id,
                        newly_recorded = result.newly_recorded,
                        "webhook payment reconciled"
                    );
                    return Ok(WebhookOutcome::Processed);
                }
                Err(e) if e.is_retryable() && attempt < STORAGE_RETRY_ATTEMPTS => {
                    warn!(error = %e, attempt, order_id, "webhook reconciliation retrying");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        order_id,
                        payment_id,
                        "webhook reconciliation failed, acknowledging for redelivery"
                    );
                    return Ok(WebhookOutcome::Acknowledged);
                }
            }
        }
    }

    /// Appends the audit row with bounded retries. The row is best-effort:
    /// losing it must not block payment reconciliation.
    async fn append_audit_row(&self, event: WebhookEvent) {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.webhook_log.append(event.clone()).await {
                Ok(()) => return,
                Err(e) if attempt < STORAGE_RETRY_ATTEMPTS => {
                    warn!(error = %e, attempt, "webhook audit append retrying");
                }
                Err(e) => {
                    error!(error = %e, "webhook audit append failed, continuing");
                    return;
                }
            }
        }
    }
}
