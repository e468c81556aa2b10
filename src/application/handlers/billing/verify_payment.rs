//! Client-initiated payment verification.

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::domain::signature::verify_checkout_signature;
use crate::domain::{BillingError, PaymentRecordStatus};
use crate::ports::OrderLedger;

use super::reconciler::PaymentReconciler;

/// Request from the client after it believes payment completed.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Confirmed payment details returned to the client.
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    pub order_id: String,
    pub payment_id: String,
    pub plan_id: String,
    pub tenant_user_id: String,
    pub tenant_email: String,
}

/// Verifies the checkout signature and reconciles the payment.
pub struct VerifyPaymentHandler {
    ledger: Arc<dyn OrderLedger>,
    reconciler: Arc<PaymentReconciler>,
    checkout_secret: SecretString,
}

impl VerifyPaymentHandler {
    pub fn new(
        ledger: Arc<dyn OrderLedger>,
        reconciler: Arc<PaymentReconciler>,
        checkout_secret: SecretString,
    ) -> Self {
        Self {
            ledger,
            reconciler,
            checkout_secret,
        }
    }

    /// Verifies and reconciles one payment confirmation.
    ///
    /// The client's claimed plan and tenant are never trusted; everything
    /// recorded comes from the ledger order created at checkout.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidSignature` before any persistence if
    /// the signature does not verify, `BillingError::OrderNotFound` if the
    /// order was never created here, or storage/plan errors from
    /// reconciliation.
    pub async fn handle(
        &self,
        command: VerifyPaymentCommand,
    ) -> Result<VerifiedPayment, BillingError> {
        let valid = verify_checkout_signature(
            &command.order_id,
            &command.payment_id,
            &command.signature,
            self.checkout_secret.expose_secret(),
        );
        if !valid {
            warn!(order_id = %command.order_id, "checkout signature rejected");
            return Err(BillingError::InvalidSignature);
        }

        let order = self
            .ledger
            .find(&command.order_id)
            .await?
            .ok_or_else(|| BillingError::OrderNotFound(command.order_id.clone()))?;

        let result = self
            .reconciler
            .reconcile(
                &order,
                &command.payment_id,
                &command.signature,
                PaymentRecordStatus::Verified,
                Utc::now(),
            )
            .await?;

        info!(
            order_id = %order.order_id,
            payment_id = %command.payment_id,
            newly_recorded = result.newly_recorded,
            "payment verified"
        );

        Ok(VerifiedPayment {
            order_id: order.order_id.clone(),
            payment_id: command.payment_id,
            plan_id: order.plan_id.clone(),
            tenant_user_id: order.tenant_user_id.clone(),
            tenant_email: order.tenant_email.clone(),
        })
    }
}
